mod memory;
mod redis_store;

pub use self::memory::InMemoryCache;
pub use self::redis_store::RedisCache;

/// 將裸主機位址（例如 `127.0.0.1`）轉成 redis 連線 URL
pub fn normalize_cache_target(target: &str) -> String {
    let target = target.trim();
    if target.contains("://") {
        target.to_string()
    } else {
        format!("redis://{}/", target)
    }
}

/// 移除連線 URL 中的密碼，供日誌與錯誤訊息使用
pub fn redact_cache_target(target: &str) -> String {
    let normalized = normalize_cache_target(target);
    match url::Url::parse(&normalized) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(None);
            }
            url.to_string()
        }
        Err(_) => "<unparseable cache target>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_redis_scheme() {
        assert_eq!(normalize_cache_target("127.0.0.1"), "redis://127.0.0.1/");
        assert_eq!(
            normalize_cache_target(" cache.internal:6380 "),
            "redis://cache.internal:6380/"
        );
    }

    #[test]
    fn test_full_url_is_kept() {
        assert_eq!(
            normalize_cache_target("rediss://user:pw@cache.example.com/2"),
            "rediss://user:pw@cache.example.com/2"
        );
    }

    #[test]
    fn test_redact_removes_password() {
        let redacted = redact_cache_target("rediss://user:pw@cache.example.com/2");
        assert_eq!(redacted, "rediss://user@cache.example.com/2");
        assert!(!redacted.contains("pw"));

        assert_eq!(
            redact_cache_target("redis://:s3cret@10.0.0.5:6379/"),
            "redis://10.0.0.5:6379/"
        );
    }

    #[test]
    fn test_redact_keeps_targets_without_password() {
        assert_eq!(redact_cache_target("127.0.0.1"), "redis://127.0.0.1/");
        assert_eq!(
            redact_cache_target("redis://user@cache.internal:6380/1"),
            "redis://user@cache.internal:6380/1"
        );
    }

    #[test]
    fn test_redact_hides_unparseable_targets() {
        assert_eq!(
            redact_cache_target("redis://user:pw@[bad"),
            "<unparseable cache target>"
        );
    }
}
