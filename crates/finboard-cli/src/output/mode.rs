use crate::cli::{Commands, FiltersCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Login { json, .. }
        | Commands::Logout { json }
        | Commands::Whoami { json }
        | Commands::Metrics { json, .. }
        | Commands::Monthly { json, .. }
        | Commands::Table { json, .. }
        | Commands::Facets { json, .. } => *json,
        Commands::Filters { command } => match command {
            FiltersCommand::Show { json }
            | FiltersCommand::Set { json, .. }
            | FiltersCommand::Toggle { json, .. }
            | FiltersCommand::Reset { json } => *json,
        },
    };
    OutputMode::from_flag(json)
}
