pub mod error;
pub mod memory;
pub mod supabase;
pub mod traits;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use supabase::SupabaseClient;
pub use traits::ReviewStore;
