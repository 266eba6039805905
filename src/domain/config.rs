#[derive(Debug, Clone)]
pub struct SupabaseSecrets {
    pub storage_url: String,
    pub api_key: String,
    pub bucket_name: String,
}

#[derive(Debug, Clone)]
pub struct DeepSeekSecrets {
    pub base_url: String,
    pub api_key: String,
}

/// Process-wide configuration, read once at startup and injected into the
/// gateway constructors. The API keys are never logged or echoed in responses.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub supabase: SupabaseSecrets,
    pub deepseek: DeepSeekSecrets,
}

impl Secrets {
    pub fn from_env() -> Self {
        let storage_url = std::env::var("SUPABASE_URL")
            .expect("ERROR: SUPABASE_URL environment variable must be set");
        let api_key = std::env::var("SUPABASE_SERVICE_KEY")
            .expect("ERROR: SUPABASE_SERVICE_KEY environment variable must be set");
        let bucket_name =
            std::env::var("SUPABASE_BUCKET").unwrap_or_else(|_| "documents".to_string());

        let deepseek_api_key = std::env::var("DEEPSEEK_API_KEY")
            .expect("ERROR: DEEPSEEK_API_KEY environment variable must be set");
        let deepseek_base_url = std::env::var("DEEPSEEK_BASE_URL")
            .unwrap_or_else(|_| "https://api.deepseek.com".to_string());

        Self {
            supabase: SupabaseSecrets {
                storage_url,
                api_key,
                bucket_name,
            },
            deepseek: DeepSeekSecrets {
                base_url: deepseek_base_url,
                api_key: deepseek_api_key,
            },
        }
    }
}
