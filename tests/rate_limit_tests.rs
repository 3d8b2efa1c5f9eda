use shotlog::rate_limit::LoginRateLimiter;

#[test]
fn blocks_after_five_failures() {
    let limiter = LoginRateLimiter::new();
    for _ in 0..4 {
        limiter.record_failure("sam@range.test");
        assert!(limiter.check("sam@range.test").is_ok());
    }
    limiter.record_failure("sam@range.test");
    assert!(limiter.check("sam@range.test").is_err());
}

#[test]
fn padded_and_cased_variants_share_one_counter() {
    let limiter = LoginRateLimiter::new();
    for _ in 0..5 {
        limiter.record_failure("sam@range.test");
    }

    assert!(limiter.check("sam@range.test ").is_err());
    assert!(limiter.check(" sam@range.test").is_err());
    assert!(limiter.check("\tSAM@Range.test\n").is_err());
}

#[test]
fn failures_under_different_spellings_accumulate() {
    let limiter = LoginRateLimiter::new();
    for variant in ["sam@range.test", " sam@range.test", "SAM@range.test ", "sam@range.test  ", "Sam@Range.Test"] {
        limiter.record_failure(variant);
    }
    assert!(limiter.check("sam@range.test").is_err());
}

#[test]
fn clear_resets_every_spelling() {
    let limiter = LoginRateLimiter::new();
    for _ in 0..5 {
        limiter.record_failure("sam@range.test");
    }
    limiter.clear(" Sam@range.test ");
    assert!(limiter.check("sam@range.test").is_ok());
}
