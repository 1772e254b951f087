//! Help-text templates handed to the command builder

/// Templates for the three kinds of help screens
///
/// Placeholders are clap's (`{name}`, `{about}`, `{usage}`, `{subcommands}`,
/// `{options}`, `{version}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpTemplates {
    /// Top-level `holo --help`
    pub app: String,
    /// Command groups such as `holo artifacts`
    pub group: String,
    /// Leaf commands such as `holo artifacts put`
    pub command: String,
}

impl Default for HelpTemplates {
    fn default() -> Self {
        Self {
            app: "\
--------------------------------------------
| {name} - {about} |
--------------------------------------------
USAGE:
  {usage}

COMMANDS:
{subcommands}

Use \"holo [command] --help\" for more information about a command.

GLOBAL OPTIONS:
{options}
"
            .to_owned(),
            group: "\
USAGE:
  {usage}

DESCRIPTION:
  {about}

COMMANDS:
{subcommands}

Use \"holo [command] [subcommand] --help\" for more information about a command.
"
            .to_owned(),
            command: "\
USAGE:
  {usage}

DESCRIPTION:
  {about}

OPTIONS:
{options}
"
            .to_owned(),
        }
    }
}
