//! Terminal typesetting for display math: common LaTeX commands to Unicode.
//!
//! This is a best-effort reading aid, not a LaTeX engine. Unknown commands lose
//! their backslash (`\sin` -> `sin`), groups lose their braces, and `\\` starts a
//! new line.

/// Command name -> replacement.
const SYMBOLS: &[(&str, &str)] = &[
    ("cdot", "·"),
    ("times", "×"),
    ("div", "÷"),
    ("pm", "±"),
    ("mp", "∓"),
    ("leq", "≤"),
    ("le", "≤"),
    ("geq", "≥"),
    ("ge", "≥"),
    ("neq", "≠"),
    ("ne", "≠"),
    ("approx", "≈"),
    ("equiv", "≡"),
    ("infty", "∞"),
    ("to", "→"),
    ("rightarrow", "→"),
    ("Rightarrow", "⇒"),
    ("implies", "⟹"),
    ("iff", "⟺"),
    ("in", "∈"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("int", "∫"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("circ", "°"),
    ("degree", "°"),
    ("cdots", "⋯"),
    ("ldots", "…"),
    ("dots", "…"),
    ("quad", "  "),
    ("qquad", "    "),
    ("alpha", "α"),
    ("beta", "β"),
    ("gamma", "γ"),
    ("delta", "δ"),
    ("epsilon", "ε"),
    ("varepsilon", "ε"),
    ("theta", "θ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("phi", "φ"),
    ("varphi", "φ"),
    ("omega", "ω"),
    ("Gamma", "Γ"),
    ("Delta", "Δ"),
    ("Theta", "Θ"),
    ("Lambda", "Λ"),
    ("Pi", "Π"),
    ("Sigma", "Σ"),
    ("Phi", "Φ"),
    ("Omega", "Ω"),
];

const SUPERSCRIPTS: &[(char, char)] = &[
    ('0', '⁰'),
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
    ('+', '⁺'),
    ('-', '⁻'),
    ('=', '⁼'),
    ('(', '⁽'),
    (')', '⁾'),
    ('n', 'ⁿ'),
    ('i', 'ⁱ'),
];

const SUBSCRIPTS: &[(char, char)] = &[
    ('0', '₀'),
    ('1', '₁'),
    ('2', '₂'),
    ('3', '₃'),
    ('4', '₄'),
    ('5', '₅'),
    ('6', '₆'),
    ('7', '₇'),
    ('8', '₈'),
    ('9', '₉'),
    ('+', '₊'),
    ('-', '₋'),
    ('=', '₌'),
    ('(', '₍'),
    (')', '₎'),
    ('a', 'ₐ'),
    ('e', 'ₑ'),
    ('o', 'ₒ'),
    ('x', 'ₓ'),
    ('n', 'ₙ'),
];

/// Commands whose single argument is kept as-is (braces dropped).
const TEXT_COMMANDS: &[&str] = &["text", "textrm", "mathrm", "operatorname"];
/// Commands whose argument is typeset and otherwise ignored.
const STYLE_COMMANDS: &[&str] = &["mathbf", "mathit", "boldsymbol", "boxed"];

fn map_script(s: &str, table: &[(char, char)]) -> Option<String> {
    s.chars()
        .map(|c| table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to))
        .collect()
}

/// Parenthesize an operand unless it is a single character or a plain number.
fn wrap(s: &str) -> String {
    let s = s.trim();
    if s.chars().count() <= 1 || s.chars().all(|c| c.is_ascii_digit()) {
        s.to_string()
    } else {
        format!("({})", s)
    }
}

/// Max nesting of groups and commands. Deeper input is flattened without recursion.
const MAX_DEPTH: usize = 64;

struct Typesetter {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Typesetter {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Typeset until `end` (consumed) or end of input.
    fn run(&mut self, end: Option<char>) -> String {
        if self.depth >= MAX_DEPTH {
            return self.flat(end);
        }
        self.depth += 1;
        let out = self.run_nested(end);
        self.depth -= 1;
        out
    }

    /// Text until `end` with markup characters dropped. Never recurses.
    fn flat(&mut self, end: Option<char>) -> String {
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if Some(c) == end {
                break;
            }
            if !matches!(c, '\\' | '{' | '}' | '^' | '_' | '&') {
                out.push(c);
            }
        }
        out
    }

    fn run_nested(&mut self, end: Option<char>) -> String {
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if Some(c) == end {
                break;
            }
            match c {
                '\\' => out.push_str(&self.command()),
                '^' => out.push_str(&self.script('^', SUPERSCRIPTS)),
                '_' => out.push_str(&self.script('_', SUBSCRIPTS)),
                '{' => out.push_str(&self.run(Some('}'))),
                '}' | '&' => {}
                _ => out.push(c),
            }
        }
        out
    }

    /// Raw text up to the matching `}`.
    fn raw_group(&mut self) -> String {
        self.skip_whitespace();
        if self.peek() != Some('{') {
            return self.bump().map(String::from).unwrap_or_default();
        }
        self.pos += 1;
        let mut depth = 1;
        let mut out = String::new();
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            out.push(c);
        }
        out
    }

    /// A braced group, a single command, or a single character, typeset.
    fn group(&mut self) -> String {
        self.skip_whitespace();
        match self.bump() {
            Some('{') => self.run(Some('}')),
            Some('\\') => self.command(),
            Some(c) => c.to_string(),
            None => String::new(),
        }
    }

    fn script(&mut self, marker: char, table: &[(char, char)]) -> String {
        let arg = self.group();
        match map_script(&arg, table) {
            Some(mapped) if !arg.is_empty() => mapped,
            _ if arg.chars().count() == 1 => format!("{}{}", marker, arg),
            _ => format!("{}({})", marker, arg),
        }
    }

    /// A command after its backslash.
    fn command(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(c);
            self.pos += 1;
        }
        if self.depth >= MAX_DEPTH {
            return symbol(&name);
        }
        self.depth += 1;
        let out = self.command_body(name);
        self.depth -= 1;
        out
    }

    fn command_body(&mut self, name: String) -> String {
        if name.is_empty() {
            return match self.bump() {
                Some('\\') => "\n".to_string(),
                Some(',' | ';' | ':' | ' ') => " ".to_string(),
                Some('!') | None => String::new(),
                Some(c) => c.to_string(),
            };
        }
        match name.as_str() {
            "frac" | "dfrac" | "tfrac" => {
                let num = self.group();
                let den = self.group();
                format!("{}/{}", wrap(&num), wrap(&den))
            }
            "sqrt" => {
                self.skip_whitespace();
                let index = if self.peek() == Some('[') {
                    self.pos += 1;
                    self.run(Some(']'))
                } else {
                    String::new()
                };
                let radicand = self.group();
                format!("{}√{}", index.trim(), wrap(&radicand))
            }
            "left" | "right" => {
                if self.peek() == Some('.') {
                    self.pos += 1;
                }
                String::new()
            }
            n if TEXT_COMMANDS.contains(&n) => self.raw_group(),
            "displaystyle" => String::new(),
            n if STYLE_COMMANDS.contains(&n) => self.group(),
            n => symbol(n),
        }
    }
}

/// Unicode replacement for a command name, or the name itself.
fn symbol(name: &str) -> String {
    SYMBOLS
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .map(|(_, sym)| sym.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Render a display-math body as Unicode lines for the terminal.
/// Whitespace runs collapse to one space; empty lines are dropped.
pub fn typeset(latex: &str) -> String {
    let mut t = Typesetter {
        chars: latex.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let raw = t.run(None);
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_fraction() {
        assert_eq!(typeset(r"\frac{1}{2}"), "1/2");
    }

    #[test]
    fn quadratic_formula() {
        assert_eq!(
            typeset(r"x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a}"),
            "x = (-b ± √(b² - 4ac))/(2a)"
        );
    }

    #[test]
    fn scripts() {
        assert_eq!(typeset(r"x^{2} + y_1"), "x² + y₁");
        assert_eq!(typeset(r"e^{i\pi}"), "e^(iπ)");
        assert_eq!(typeset(r"a^b"), "a^b");
    }

    #[test]
    fn greek_and_operators() {
        assert_eq!(typeset(r"\alpha \cdot \beta"), "α · β");
        assert_eq!(typeset(r"\text{if } x \neq 0"), "if x ≠ 0");
    }

    #[test]
    fn aligned_rows_become_lines() {
        assert_eq!(typeset(r"a &= b \\ c &= d"), "a = b\nc = d");
    }

    #[test]
    fn left_right_dropped() {
        assert_eq!(typeset(r"\left( x \right)"), "( x )");
        assert_eq!(typeset(r"\left. x \right|"), "x |");
    }

    #[test]
    fn unknown_command_keeps_name() {
        assert_eq!(typeset(r"\sin x"), "sin x");
    }

    #[test]
    fn sqrt_with_index() {
        assert_eq!(typeset(r"\sqrt[3]{27} = 3"), "3√27 = 3");
    }

    #[test]
    fn blank_and_multiline_bodies() {
        assert_eq!(typeset(""), "");
        assert_eq!(typeset("  \n x + 1 = 2 \n "), "x + 1 = 2");
    }

    /// Typeset on a thread with the same 2MB stack as spawned threads.
    fn typeset_on_small_stack(input: String) -> String {
        std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || typeset(&input))
            .unwrap()
            .join()
            .unwrap()
    }

    #[test]
    fn deep_nesting_is_flattened() {
        assert_eq!(typeset_on_small_stack("{".repeat(100_000)), "");
        let nested = format!("{}x + 1{}", "{".repeat(100_000), "}".repeat(100_000));
        assert_eq!(typeset_on_small_stack(nested), "x + 1");
    }

    #[test]
    fn deep_command_chains_are_flattened() {
        let out = typeset_on_small_stack(r"\frac".repeat(100_000));
        assert!(out.contains("frac"));
        let out = typeset_on_small_stack(format!("{}2{}", r"\sqrt[".repeat(50_000), "]".repeat(50_000)));
        assert!(out.contains('2'));
    }

    #[test]
    fn shallow_nesting_still_typeset() {
        assert_eq!(typeset(r"{{\frac{1}{2}}}"), "1/2");
    }

    #[test]
    fn unbalanced_braces_do_not_panic() {
        assert_eq!(typeset(r"\frac{1"), "1/");
        assert_eq!(typeset("}x{"), "x");
    }
}
