use crate::domain::logging::{LogEntry, LogLevel};
use crate::domain::port::Logger;
use std::collections::HashMap;

/// コンソールログ実装
/// 標準出力・標準エラー出力にログを出力する
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }

    fn log(
        &self,
        level: LogLevel,
        component: &str,
        message: &str,
        context: Option<HashMap<String, String>>,
    ) {
        let mut entry = LogEntry::new(level, message.to_string(), component.to_string());

        if let Some(ctx) = context {
            for (key, value) in ctx {
                entry = entry.with_context(key, value);
            }
        }

        match level {
            LogLevel::Error => eprintln!("{}", entry.format()),
            _ => println!("{}", entry.format()),
        }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for ConsoleLogger {
    fn info(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Info, component, message, context);
    }

    fn warn(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Warning, component, message, context);
    }

    fn error(&self, component: &str, message: &str, context: Option<HashMap<String, String>>) {
        self.log(LogLevel::Error, component, message, context);
    }
}
