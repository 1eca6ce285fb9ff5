use crate::error::WaitlistError;

/// Added to the real row count before it is shown on the page.
pub const WAITLIST_DISPLAY_OFFSET: u64 = 3006;
pub const WAITLIST_POLL_INTERVAL_MS: u32 = 30_000;
pub const COUNT_ANIMATION_MS: f64 = 2500.0;
pub const CLOSE_FORM_DELAY_MS: u32 = 2_000;

pub const SUPABASE_URL_VAR: &str = "PLURETO_SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "PLURETO_SUPABASE_ANON_KEY";
pub const SUPABASE_TABLE_VAR: &str = "PLURETO_SUPABASE_WAITLIST_TABLE";

/// Document order of the landing page sections.
pub const SECTION_ORDER: [&str; 8] = [
    "hero",
    "pillars",
    "smarter",
    "features-grid",
    "calendar",
    "insights",
    "final-section",
    "footer",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaitlistSettings {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

impl WaitlistSettings {
    /// Every value must be present and non-blank, otherwise the waitlist is disabled.
    pub fn from_parts(
        url: Option<&str>,
        anon_key: Option<&str>,
        table: Option<&str>,
    ) -> Result<Self, WaitlistError> {
        let mut missing = Vec::new();
        let url = required(url, SUPABASE_URL_VAR, &mut missing);
        let anon_key = required(anon_key, SUPABASE_ANON_KEY_VAR, &mut missing);
        let table = required(table, SUPABASE_TABLE_VAR, &mut missing);

        match (url, anon_key, table) {
            (Some(url), Some(anon_key), Some(table)) => Ok(Self {
                url: url.trim_end_matches('/').to_string(),
                anon_key: anon_key.to_string(),
                table: table.to_string(),
            }),
            _ => Err(WaitlistError::ConfigurationMissing { missing }),
        }
    }

    pub fn rest_endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }
}

fn required<'a>(
    value: Option<&'a str>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Some(value),
        _ => {
            missing.push(name);
            None
        }
    }
}

// Baked in by trunk/cargo at build time, the page has no runtime environment.
pub fn waitlist_settings() -> Result<WaitlistSettings, WaitlistError> {
    WaitlistSettings::from_parts(
        option_env!("PLURETO_SUPABASE_URL"),
        option_env!("PLURETO_SUPABASE_ANON_KEY"),
        option_env!("PLURETO_SUPABASE_WAITLIST_TABLE"),
    )
}
