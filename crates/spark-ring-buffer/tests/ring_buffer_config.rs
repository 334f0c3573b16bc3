//! `ring_buffer_config` 集成测试：验证 TOML 装载、缺省回落与非法组合的拒绝路径。

use spark_ring_buffer::{
    ConfigError, DEFAULT_INITIAL_SIZE, DEFAULT_MAX_SIZE, RingBuffer, RingBufferConfig,
};

#[test]
fn loads_sizes_from_toml() {
    let config = RingBufferConfig::from_toml_str(
        r#"
        initial_size = 4096
        max_size = 1048576
        "#,
    )
    .expect("合法配置应装载成功");
    assert_eq!(config, RingBufferConfig::new(4096, 1 << 20));

    let ring = RingBuffer::from_config(&config).expect("校验通过的配置必然可构造");
    assert_eq!(ring.capacity(), 4096);
    assert_eq!(ring.max_capacity(), 1 << 20);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config = RingBufferConfig::from_toml_str("max_size = 65536").unwrap();
    assert_eq!(config.initial_size, DEFAULT_INITIAL_SIZE);
    assert_eq!(config.max_size, 65536);

    let empty = RingBufferConfig::from_toml_str("").unwrap();
    assert_eq!(empty, RingBufferConfig::default());
    assert_eq!(empty.max_size, DEFAULT_MAX_SIZE);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RingBufferConfig::from_toml_str("initial_size = 8\nmax_sise = 16").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err}");
}

#[test]
fn initial_size_above_maximum_is_invalid() {
    let err = RingBufferConfig::from_toml_str("initial_size = 16\nmax_size = 8").unwrap_err();
    match err {
        ConfigError::Invalid(inner) => assert!(inner.is_invalid_argument()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn serializes_back_to_toml() {
    let config = RingBufferConfig::new(64, 4096);
    let text = toml::to_string(&config).expect("配置应可序列化");
    assert_eq!(RingBufferConfig::from_toml_str(&text).unwrap(), config);
}
