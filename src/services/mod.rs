pub mod error;
mod deepseek;
mod supabase_storage;

pub use deepseek::DeepSeekClient;
pub use supabase_storage::SupabaseStorage;
