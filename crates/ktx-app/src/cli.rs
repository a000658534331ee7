use clap::Parser;

const AFTER_HELP: &str = "\
EXAMPLES:
    ktx                 pick a context from every configured kubeconfig
    ktx prod            pick from the kubeconfig with alias 'prod'
    ktx prod eu         same, only contexts whose name or alias contains 'eu'
    ktx -               switch back to the previous context
    ktx -c              print the current context
    ktx -c lab          switch to the context named or aliased 'lab'

ENVIRONMENT:
    KTX_CONFIG_DIR      directory holding config.toml (default: $XDG_CONFIG_HOME/ktx)
    KUBECONFIG          kubeconfig files listed when config.toml is first generated
    RUST_LOG            log filter for diagnostics written to stderr

FILES:
    config.toml             kubeconfig list, context attributes, theme
    contexts_<alias>.yaml   per-kubeconfig context attributes, kept in sync
    .state                  current and previous context";

/// Interactive kubeconfig context switcher.
#[derive(Debug, Parser)]
#[command(name = "ktx", version, after_help = AFTER_HELP)]
pub struct Cli {
    /// Print the current context, or switch directly to NAME when given
    #[arg(short = 'c', long = "current", visible_alias = "is", value_name = "NAME", num_args = 0..=1, conflicts_with = "filters")]
    pub current: Option<Option<String>>,

    /// `-` to switch back, otherwise [CONFIG_ALIAS [CONTEXT_FILTER]]
    #[arg(value_name = "FILTER", num_args = 0..=2)]
    pub filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick { config_filter: String, context_filter: String },
    SwitchBack,
    Current,
    Use(String),
}

impl Cli {
    pub fn command(&self) -> Command {
        match (&self.current, self.filters.as_slice()) {
            (Some(Some(name)), _) => Command::Use(name.clone()),
            (Some(None), _) => Command::Current,
            (None, [dash]) if dash == "-" => Command::SwitchBack,
            (None, filters) => Command::Pick {
                config_filter: filters.first().cloned().unwrap_or_default(),
                context_filter: filters.get(1).cloned().unwrap_or_default(),
            },
        }
    }
}
