pub struct Icons;

impl Icons {
    pub const WARN: &str = "⚠️";
    pub const NEW: &str = "✨";
    pub const MOD: &str = "📝";
    pub const DEL: &str = "🗑️";
    pub const DATABASE: &str = "🗄️";
    pub const SEARCH: &str = "🔍";
}
