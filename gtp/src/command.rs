use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub id: u32,
    pub name: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<I, S>(id: u32, name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            name: name.to_owned(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The full command line, terminator included. Arguments are not escaped.
    pub fn encode(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)?;

        for arg in &self.args {
            write!(f, " {arg}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_without_arguments() {
        assert_eq!(Command::new(1, "quit", Vec::<String>::new()).encode(), "1 quit\n");
    }

    #[test]
    fn encode_with_arguments() {
        let command = Command::new(12, "play", ["black", "D4"]);
        assert_eq!(command.encode(), "12 play black D4\n");
    }
}
