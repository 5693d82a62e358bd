// Buraunza state managers
// Managers handle stateful operations; currently the download registry.

pub mod download_manager;
