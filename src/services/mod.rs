// Buraunza services
// Services wrap external state the managers consume, such as persisted settings.

pub mod settings_engine;
