//! A rejected first `init` installs nothing. Separate binary: the installed
//! logger lives for the whole process.

use std::sync::Arc;

use batchlog::config::LoggerConfig;
use batchlog::logger::{self, Level, LoggerError};
use batchlog::trace::NoopProvider;

#[tokio::test]
async fn test_failed_init_can_be_retried() {
    let invalid = LoggerConfig {
        level: "shouting".into(),
        ..LoggerConfig::default()
    };
    let unopenable = LoggerConfig {
        output: "/nonexistent-dir/for/sure/app.log".into(),
        ..LoggerConfig::default()
    };
    let valid = LoggerConfig {
        level: "warn".into(),
        output: "stderr".into(),
        ..LoggerConfig::default()
    };

    assert!(matches!(
        logger::init(invalid, Arc::new(NoopProvider)),
        Err(LoggerError::InvalidLevel(_))
    ));
    assert!(logger::get().is_none());

    assert!(matches!(
        logger::init(unopenable, Arc::new(NoopProvider)),
        Err(LoggerError::SinkBuild { .. })
    ));
    assert!(logger::get().is_none());

    let installed = logger::init(valid.clone(), Arc::new(NoopProvider)).unwrap();
    assert_eq!(installed.config(), &valid);
    assert_eq!(logger::get().unwrap().min_level(), Level::Warn);
    logger::shutdown().await;
}
