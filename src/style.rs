use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn parse(style: &str) -> Self {
        let mut out = Self::default();
        for decl in style.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() {
                continue;
            }
            out.set(name, value);
        }
        out
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.decls
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        match self.decls.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.decls.push((name, value)),
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, value)) in self.decls.iter().enumerate() {
            if idx != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_trims() {
        let style = InlineStyle::parse(" opacity:0 ; transform: translateY(30px);;bogus");
        assert_eq!(style.get("opacity"), Some("0"));
        assert_eq!(style.get("Transform"), Some("translateY(30px)"));
        assert_eq!(style.to_string(), "opacity: 0; transform: translateY(30px);");
    }

    #[test]
    fn set_replaces_in_place() {
        let mut style = InlineStyle::parse("a: 1; b: 2");
        style.set("A", "3");
        style.set("c", "4");
        assert_eq!(style.to_string(), "a: 3; b: 2; c: 4;");
    }

    #[test]
    fn values_with_colons_survive() {
        let style = InlineStyle::parse("background: url(http://x/a.png)");
        assert_eq!(style.get("background"), Some("url(http://x/a.png)"));
    }
}
