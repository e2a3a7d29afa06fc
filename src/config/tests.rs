use serial_test::serial;

use super::settings::{ProducerSettings, RelaySettings};
use super::load_config;

const REQUIRED: [(&str, Option<&str>); 3] = [
    ("AMQP_USERNAME", Some("relay")),
    ("AMQP_PASSWORD", Some("secret")),
    ("AMQP_HOST", Some("localhost")),
];

#[test]
fn test_default_relay_settings() {
    let settings = RelaySettings::default();
    assert_eq!(settings.work_queue, "work_queue");
    assert_eq!(settings.prioritized_queue, "prioritized_work_queue");
}

#[test]
fn test_default_producer_settings() {
    let settings = ProducerSettings::default();
    assert_eq!(settings.batch_size, 96);
    assert_eq!(settings.batch_delay_secs, 30);
    assert_eq!(settings.message_count, 500);
}

#[test]
#[serial]
fn test_load_config_applies_defaults() {
    temp_env::with_vars(REQUIRED, || {
        let settings = load_config().expect("load_config failed");
        assert_eq!(settings.amqp.username, "relay");
        assert_eq!(settings.amqp.password, "secret");
        assert_eq!(settings.amqp.host, "localhost");
        assert_eq!(settings.amqp.vhost, "/");
        assert_eq!(settings.amqp.retry_delay_secs, 5);
        assert_eq!(settings.relay.work_queue, "work_queue");
        assert_eq!(settings.relay.prioritized_queue, "prioritized_work_queue");
        assert_eq!(settings.producer.batch_size, 96);
    });
}

#[test]
#[serial]
fn test_load_config_env_overrides() {
    temp_env::with_vars(
        [
            ("AMQP_USERNAME", Some("relay")),
            ("AMQP_PASSWORD", Some("secret")),
            ("AMQP_HOST", Some("broker.staging.internal")),
            ("AMQP_VHOST", Some("/staging")),
        ],
        || {
            let settings = load_config().expect("load_config failed");
            assert_eq!(settings.amqp.host, "broker.staging.internal");
            assert_eq!(settings.amqp.vhost, "/staging");
        },
    );
}

#[test]
#[serial]
fn test_load_config_requires_credentials() {
    temp_env::with_vars(
        [
            ("AMQP_USERNAME", None::<&str>),
            ("AMQP_PASSWORD", None),
            ("AMQP_HOST", None),
        ],
        || {
            let error = load_config().expect_err("missing credentials must fail");
            assert!(error.to_string().contains("AMQP_USERNAME"));
        },
    );
}

#[test]
#[serial]
fn test_load_config_rejects_blank_credentials() {
    temp_env::with_vars(
        [
            ("AMQP_USERNAME", Some("   ")),
            ("AMQP_PASSWORD", Some("secret")),
            ("AMQP_HOST", Some("localhost")),
        ],
        || {
            let error = load_config().expect_err("blank username must fail");
            assert!(error.to_string().contains("AMQP_USERNAME"));
        },
    );
}

#[test]
#[serial]
fn test_load_config_reads_config_file() {
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    // Run from a temporary directory so load_config picks up its
    // config/default.toml instead of anything in the repository.
    let tmp = TempDir::new().expect("create tempdir");
    let orig = env::current_dir().expect("current_dir");
    env::set_current_dir(tmp.path()).expect("set current dir");

    fs::create_dir_all("config").expect("create config dir");
    let toml = r#"
        [amqp]
        username = "file_user"
        password = "file_pass"
        host = "broker.file.internal"
        retry_delay_secs = 1

        [relay]
        work_queue = "inbox"
        prioritized_queue = "inbox_prioritized"

        [producer]
        batch_size = 8
        batch_delay_secs = 0
        message_count = 16
    "#;
    fs::write("config/default.toml", toml).expect("write config file");

    let result = temp_env::with_vars(
        [
            ("AMQP_USERNAME", None::<&str>),
            ("AMQP_PASSWORD", None),
            ("AMQP_HOST", None),
        ],
        load_config,
    );

    env::set_current_dir(orig).expect("restore current dir");

    let settings = result.expect("load_config failed");
    assert_eq!(settings.amqp.username, "file_user");
    assert_eq!(settings.amqp.host, "broker.file.internal");
    assert_eq!(settings.amqp.retry_delay_secs, 1);
    assert_eq!(settings.relay.work_queue, "inbox");
    assert_eq!(settings.relay.prioritized_queue, "inbox_prioritized");
    assert_eq!(settings.producer.batch_size, 8);
    assert_eq!(settings.producer.message_count, 16);
}
