//! External program invocation shared by the speech adapters.

/// A program plus argument templates.
///
/// Templates may contain `{name}` placeholders which are substituted on each
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SpeechCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Expands placeholders in every argument.
    pub fn expand_args(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.args.iter().map(|arg| expand(arg, vars)).collect()
    }

    /// True if any argument mentions `{name}`.
    pub fn uses(&self, name: &str) -> bool {
        let placeholder = format!("{{{name}}}");
        self.args.iter().any(|arg| arg.contains(&placeholder))
    }
}

/// Single pass, so substituted values are never expanded again.
fn expand(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
