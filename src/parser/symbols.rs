//! Mathematical symbols from TeX commands.
//!
//! The built-in table maps a command name (without backslash) to the glyph it stands for.
//! Blackboard-bold forms are keyed as `mathbb{X}`.

use std::collections::BTreeMap;


/// Given a LateX name (e.g. "alpha"), returns the corresponding glyph from the built-in table
pub fn lookup(name: &str) -> Option<&'static str> {
    SYMBOLS
        .iter()
        .find(|(symbol_name, _)| *symbol_name == name)
        .map(|(_, glyph)| *glyph)
}


/// A symbol table that can be extended at start-up.
/// Registered entries shadow the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRegistry {
    extras : BTreeMap<String, String>,
}

static BUILTIN : SymbolRegistry = SymbolRegistry::new();

impl SymbolRegistry {
    /// Creates a registry with only the built-in table
    pub const fn new() -> Self {
        Self { extras : BTreeMap::new() }
    }

    /// A shared registry with no extra entry
    pub fn builtin() -> &'static SymbolRegistry {
        &BUILTIN
    }

    /// Adds or replaces an entry ; returns the glyph it shadows among previously registered entries
    pub fn register(&mut self, name : impl Into<String>, glyph : impl Into<String>) -> Option<String> {
        let name  = name.into();
        let glyph = glyph.into();
        debug!("registering symbol \\{} -> {:?}", name, glyph);
        self.extras.insert(name, glyph)
    }

    /// Builder-style version of [`SymbolRegistry::register`]
    pub fn with(mut self, name : impl Into<String>, glyph : impl Into<String>) -> Self {
        self.register(name, glyph);
        self
    }

    /// Looks up registered entries first, then the built-in table
    pub fn get(&self, name : &str) -> Option<&str> {
        self.extras
            .get(name)
            .map(String::as_str)
            .or_else(|| lookup(name))
    }

    /// Checks whether the name resolves to a glyph
    pub fn contains(&self, name : &str) -> bool {
        self.get(name).is_some()
    }
}


static SYMBOLS : &[(&str, &str)] = &[
    // Greek, lower case
    ("alpha", "α"), ("beta", "β"), ("gamma", "γ"), ("delta", "δ"), ("epsilon", "ϵ"),
    ("zeta", "ζ"), ("eta", "η"), ("theta", "θ"), ("iota", "ι"), ("kappa", "κ"),
    ("lambda", "λ"), ("mu", "μ"), ("nu", "ν"), ("xi", "ξ"), ("omicron", "ο"),
    ("pi", "π"), ("rho", "ρ"), ("sigma", "σ"), ("tau", "τ"), ("upsilon", "υ"),
    ("phi", "ϕ"), ("chi", "χ"), ("psi", "ψ"), ("omega", "ω"),
    ("varepsilon", "ε"), ("vartheta", "ϑ"), ("varpi", "ϖ"), ("varrho", "ϱ"),
    ("varsigma", "ς"), ("varphi", "φ"), ("varkappa", "ϰ"),

    // Greek, upper case
    ("Alpha", "Α"), ("Beta", "Β"), ("Gamma", "Γ"), ("Delta", "Δ"), ("Epsilon", "Ε"),
    ("Zeta", "Ζ"), ("Eta", "Η"), ("Theta", "Θ"), ("Iota", "Ι"), ("Kappa", "Κ"),
    ("Lambda", "Λ"), ("Mu", "Μ"), ("Nu", "Ν"), ("Xi", "Ξ"), ("Omicron", "Ο"),
    ("Pi", "Π"), ("Rho", "Ρ"), ("Sigma", "Σ"), ("Tau", "Τ"), ("Upsilon", "Υ"),
    ("Phi", "Φ"), ("Chi", "Χ"), ("Psi", "Ψ"), ("Omega", "Ω"),

    // Binary operators
    ("pm", "±"), ("mp", "∓"), ("times", "×"), ("div", "÷"), ("cdot", "⋅"),
    ("circ", "∘"), ("ast", "∗"), ("star", "⋆"), ("bullet", "∙"), ("oplus", "⊕"),
    ("ominus", "⊖"), ("otimes", "⊗"), ("oslash", "⊘"), ("odot", "⊙"),
    ("wedge", "∧"), ("land", "∧"), ("vee", "∨"), ("lor", "∨"),
    ("cap", "∩"), ("cup", "∪"), ("setminus", "∖"), ("diamond", "⋄"),

    // Relations
    ("leq", "≤"), ("le", "≤"), ("geq", "≥"), ("ge", "≥"), ("neq", "≠"), ("ne", "≠"),
    ("approx", "≈"), ("equiv", "≡"), ("sim", "∼"), ("simeq", "≃"), ("cong", "≅"),
    ("propto", "∝"), ("ll", "≪"), ("gg", "≫"), ("prec", "≺"), ("succ", "≻"),
    ("perp", "⊥"), ("parallel", "∥"), ("mid", "∣"), ("models", "⊨"), ("vdash", "⊢"),

    // Set theory
    ("in", "∈"), ("notin", "∉"), ("ni", "∋"), ("subset", "⊂"), ("supset", "⊃"),
    ("subseteq", "⊆"), ("supseteq", "⊇"), ("emptyset", "∅"), ("varnothing", "∅"),

    // Arrows
    ("to", "→"), ("rightarrow", "→"), ("leftarrow", "←"), ("gets", "←"),
    ("leftrightarrow", "↔"), ("Rightarrow", "⇒"), ("Leftarrow", "⇐"),
    ("Leftrightarrow", "⇔"), ("implies", "⟹"), ("impliedby", "⟸"), ("iff", "⟺"),
    ("mapsto", "↦"), ("longrightarrow", "⟶"), ("longleftarrow", "⟵"),
    ("uparrow", "↑"), ("downarrow", "↓"), ("nearrow", "↗"), ("searrow", "↘"),
    ("hookrightarrow", "↪"),

    // Calculus and big operators
    ("sum", "∑"), ("prod", "∏"), ("coprod", "∐"), ("int", "∫"), ("iint", "∬"),
    ("iiint", "∭"), ("oint", "∮"), ("partial", "∂"), ("nabla", "∇"), ("infty", "∞"),
    ("bigcup", "⋃"), ("bigcap", "⋂"), ("bigoplus", "⨁"), ("bigotimes", "⨂"),
    ("prime", "′"),

    // Logic
    ("forall", "∀"), ("exists", "∃"), ("nexists", "∄"), ("neg", "¬"), ("lnot", "¬"),
    ("top", "⊤"), ("bot", "⊥"), ("therefore", "∴"), ("because", "∵"),

    // Delimiters, including control symbols
    ("{", "{"), ("}", "}"), ("|", "‖"), ("lbrace", "{"), ("rbrace", "}"),
    ("langle", "⟨"), ("rangle", "⟩"), ("lceil", "⌈"), ("rceil", "⌉"),
    ("lfloor", "⌊"), ("rfloor", "⌋"), ("vert", "|"), ("Vert", "‖"),
    ("lvert", "|"), ("rvert", "|"), ("lVert", "‖"), ("rVert", "‖"),
    ("backslash", "\\"),

    // Escaped characters
    ("%", "%"), ("&", "&"), ("$", "$"), ("#", "#"), ("_", "_"),

    // Dots
    ("ldots", "…"), ("cdots", "⋯"), ("vdots", "⋮"), ("ddots", "⋱"), ("dots", "…"),

    // Miscellaneous
    ("hbar", "ℏ"), ("ell", "ℓ"), ("Re", "ℜ"), ("Im", "ℑ"), ("aleph", "ℵ"),
    ("wp", "℘"), ("angle", "∠"), ("triangle", "△"), ("degree", "°"),
    ("checkmark", "✓"), ("dagger", "†"),

    // Function names stand for their own spelling
    ("sin", "sin"), ("cos", "cos"), ("tan", "tan"), ("cot", "cot"), ("sec", "sec"),
    ("csc", "csc"), ("arcsin", "arcsin"), ("arccos", "arccos"), ("arctan", "arctan"),
    ("sinh", "sinh"), ("cosh", "cosh"), ("tanh", "tanh"), ("log", "log"), ("ln", "ln"),
    ("lg", "lg"), ("exp", "exp"), ("lim", "lim"), ("limsup", "lim sup"),
    ("liminf", "lim inf"), ("sup", "sup"), ("inf", "inf"), ("max", "max"),
    ("min", "min"), ("det", "det"), ("gcd", "gcd"), ("deg", "deg"), ("dim", "dim"),
    ("ker", "ker"), ("arg", "arg"), ("hom", "hom"), ("Pr", "Pr"),

    // Blackboard bold
    ("mathbb{A}", "𝔸"), ("mathbb{B}", "𝔹"), ("mathbb{C}", "ℂ"), ("mathbb{D}", "𝔻"),
    ("mathbb{E}", "𝔼"), ("mathbb{F}", "𝔽"), ("mathbb{G}", "𝔾"), ("mathbb{H}", "ℍ"),
    ("mathbb{I}", "𝕀"), ("mathbb{J}", "𝕁"), ("mathbb{K}", "𝕂"), ("mathbb{L}", "𝕃"),
    ("mathbb{M}", "𝕄"), ("mathbb{N}", "ℕ"), ("mathbb{O}", "𝕆"), ("mathbb{P}", "ℙ"),
    ("mathbb{Q}", "ℚ"), ("mathbb{R}", "ℝ"), ("mathbb{S}", "𝕊"), ("mathbb{T}", "𝕋"),
    ("mathbb{U}", "𝕌"), ("mathbb{V}", "𝕍"), ("mathbb{W}", "𝕎"), ("mathbb{X}", "𝕏"),
    ("mathbb{Y}", "𝕐"), ("mathbb{Z}", "ℤ"), ("mathbb{1}", "𝟙"),
];
