//! Commands enum and resource subcommands.

use clap::{Args, Subcommand, ValueEnum};
use dialer_core::VoipAppType;

/// Available commands for the dialer tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve,

    /// Manage accounts
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Manage gateways
    Gateway {
        #[command(subcommand)]
        command: GatewayCommand,
    },

    /// Manage VoIP applications
    #[command(name = "voipapp")]
    VoipApp {
        #[command(subcommand)]
        command: VoipAppCommand,
    },

    /// Place one call, either through a campaign or a raw gateway
    Dial(DialArgs),
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create an account
    Add {
        username: String,
        /// Initial password
        #[arg(long, env = "DIALER_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// Grant superuser rights
        #[arg(long)]
        superuser: bool,
    },
    /// Set the dialer limits of an account; unset flags keep their value
    Limits(LimitArgs),
}

#[derive(Args, Debug, Default)]
pub struct LimitArgs {
    pub username: String,
    #[arg(long)]
    pub max_campaigns: Option<u32>,
    #[arg(long)]
    pub max_frequency: Option<u32>,
    /// Maximum call duration in seconds
    #[arg(long)]
    pub max_duration: Option<u32>,
    #[arg(long)]
    pub max_retry: Option<u32>,
    /// Maximum call timeout in seconds
    #[arg(long)]
    pub max_timeout: Option<u32>,
}

#[derive(Subcommand)]
pub enum GatewayCommand {
    /// Register a gateway
    Add(GatewayArgs),
    /// Show registered gateways
    List,
}

#[derive(Args, Debug)]
pub struct GatewayArgs {
    pub name: String,
    /// Comma separated dial strings, e.g. `user/,sofia/gateway/backup/`
    pub gateways: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub codecs: Option<String>,
    #[arg(long)]
    pub timeouts: Option<String>,
    #[arg(long)]
    pub retries: Option<String>,
    /// Concurrent call ceiling
    #[arg(long)]
    pub max_calls: Option<u32>,
}

#[derive(Subcommand)]
pub enum VoipAppCommand {
    /// Register a VoIP application
    Add {
        name: String,
        /// What the application does once the call is answered
        #[arg(long = "type", value_enum, default_value_t = AppTypeArg::PlayAudio)]
        app_type: AppTypeArg,
        /// Audio URL, conference room, dial string or text
        data: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show registered VoIP applications
    List,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AppTypeArg {
    Dial,
    PlayAudio,
    Conference,
    Speak,
}

impl From<AppTypeArg> for VoipAppType {
    fn from(arg: AppTypeArg) -> Self {
        match arg {
            AppTypeArg::Dial => Self::Dial,
            AppTypeArg::PlayAudio => Self::PlayAudio,
            AppTypeArg::Conference => Self::Conference,
            AppTypeArg::Speak => Self::Speak,
        }
    }
}

#[derive(Args, Debug)]
pub struct DialArgs {
    /// Number to call
    pub phone_number: String,
    /// Dial with this campaign's caller ID, gateway and duration
    #[arg(long, requires = "user", conflicts_with_all = ["gateway", "caller_id"])]
    pub campaign: Option<i64>,
    /// Account the campaign is looked up as
    #[arg(long)]
    pub user: Option<String>,
    /// Raw gateway dial strings, comma separated
    #[arg(long, required_unless_present = "campaign")]
    pub gateway: Option<String>,
    #[arg(long, default_value = "")]
    pub caller_id: String,
    /// Maximum call length in seconds
    #[arg(long)]
    pub time_limit: Option<u32>,
}
