use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    // Supabase REST API
    Supabase,
    // In-process map, for local runs
    Memory,
}

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "pace-waitlist")]
#[command(about = "Waitlist signup and pace calculator API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Where signups are stored
    #[arg(long, env = "WAITLIST_STORE", value_enum, default_value_t = StoreKind::Supabase)]
    pub store: StoreKind,

    // Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    // Supabase service role key
    #[arg(long, env = "SUPABASE_SERVICE_ROLE", hide_env_values = true)]
    pub supabase_service_role: Option<String>,

    // Table holding signups (unique constraint on email)
    #[arg(long, default_value = "waitlist_signups")]
    pub table: String,

    // Timeout for store requests in seconds
    #[arg(long, default_value_t = 10)]
    pub store_timeout: u64,

    // Rate limit bucket capacity per client
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub rate_limit: u32,

    // Rate limit window in seconds (a full bucket refills over this long)
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
    pub rate_window: u64,

    // Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    /// Supabase URL and service key, if both are set.
    pub fn supabase_credentials(&self) -> Option<(&str, &str)> {
        let url = self.supabase_url.as_deref().filter(|s| !s.is_empty())?;
        let key = self.supabase_service_role.as_deref().filter(|s| !s.is_empty())?;
        Some((url, key))
    }
}
