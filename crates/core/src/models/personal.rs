use serde::{Deserialize, Serialize};

/// Contact details entered on the settings screen.
///
/// `phone`, `cpf` and `cep` are stored already masked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalData {
    pub email: String,
    pub phone: String,
    pub cpf: String,
    pub cep: String,
    pub address: String,
    pub city: String,
    pub state: String,
}

impl PersonalData {
    /// Re-apply the input masks to `phone`, `cpf` and `cep`.
    #[must_use]
    pub fn masked(mut self) -> Self {
        self.phone = format_phone(&self.phone);
        self.cpf = format_cpf(&self.cpf);
        self.cep = format_cep(&self.cep);
        self
    }
}

fn digits(value: &str, max: usize) -> Vec<char> {
    value.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Brazilian taxpayer id mask: `123.456.789-01`.
///
/// Works on partial input, so `"1234"` becomes `"123.4"`. Digits past the
/// eleventh are dropped.
pub fn format_cpf(value: &str) -> String {
    let d = digits(value, 11);
    let mut out = String::with_capacity(14);
    for (i, c) in d.into_iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Mobile phone mask: `(11) 98765-4321`. At most eleven digits.
pub fn format_phone(value: &str) -> String {
    let d = digits(value, 11);
    if d.len() <= 2 {
        return d.into_iter().collect();
    }
    let mut out = String::with_capacity(15);
    out.push('(');
    out.extend(&d[..2]);
    out.push_str(") ");
    let rest = &d[2..];
    if rest.len() > 5 {
        out.extend(&rest[..5]);
        out.push('-');
        out.extend(&rest[5..]);
    } else {
        out.extend(rest);
    }
    out
}

/// Postal code mask: `12345-678`. At most eight digits.
pub fn format_cep(value: &str) -> String {
    let d = digits(value, 8);
    let mut out = String::with_capacity(9);
    for (i, c) in d.into_iter().enumerate() {
        if i == 5 {
            out.push('-');
        }
        out.push(c);
    }
    out
}
