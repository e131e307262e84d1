//! Rules command report data structures.

use super::output::{Output, Report};

#[derive(Debug)]
pub struct RulesReport {
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug)]
pub struct RuleEntry {
    pub name: String,
    pub summary: String,
    pub params: Vec<ParamEntry>,
}

#[derive(Debug)]
pub struct ParamEntry {
    pub name: String,
    pub kind: String,
    pub description: String,
}

impl Report for RulesReport {
    fn render(&self, out: &mut dyn Output) {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(&format!("{} - {}", rule.name, rule.summary));
            for param in &rule.params {
                out.key_value_indented(&format!("{} ({})", param.name, param.kind), &param.description);
            }
        }
        out.newline();
        out.preformatted("Usage: // +validate(rule(key=value, ...)) or // +validate(skip)");
    }
}
