//! Assemble a [`Gateway`] from application configuration

use std::sync::Arc;

use og_core::clock::{Clock, SystemClock};
use og_core::repositories::{
    CallbackRepository, InMemoryCallbackRepository, InMemoryOtpRepository, InMemorySmsRepository, OtpRepository,
    SmsRepository,
};
use og_core::services::throttle::{RequestThrottle, SlidingWindowThrottle, UnlimitedThrottle};
use og_core::services::{Gateway, GatewayConfig, GatewayDependencies};
use og_shared::config::{AppConfig, RateLimitBackend, StorageBackend};

use crate::cache::RedisClient;
use crate::database::{DatabasePool, MySqlCallbackRepository, MySqlOtpRepository, MySqlSmsRepository};
use crate::sms::create_sms_service;
use crate::throttle::RedisSlidingWindowThrottle;
use crate::InfrastructureError;

struct Stores {
    otp: Arc<dyn OtpRepository>,
    callbacks: Arc<dyn CallbackRepository>,
    sms: Arc<dyn SmsRepository>,
}

/// Build the gateway with the backends selected in `config`
///
/// MySQL storage runs the embedded migrations before the gateway is
/// returned. The reaper is not started; call [`Gateway::start`].
pub async fn build_gateway(config: &AppConfig) -> Result<Arc<Gateway>, InfrastructureError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let stores = build_stores(config, clock.clone()).await?;
    let throttle = build_throttle(config, clock.clone()).await?;
    let sms_service = create_sms_service(&config.sms);

    tracing::info!(
        storage = ?config.database.backend,
        rate_limit_enabled = config.rate_limit.enabled,
        rate_limit_backend = ?config.rate_limit.backend,
        sms_provider = sms_service.provider_name(),
        "Gateway backends selected"
    );

    let deps = GatewayDependencies {
        otp_repository: stores.otp,
        callback_repository: stores.callbacks,
        sms_repository: stores.sms,
        sms_service,
        throttle,
        clock,
    };

    Ok(Arc::new(Gateway::new(deps, GatewayConfig::from(config))))
}

async fn build_stores(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Stores, InfrastructureError> {
    match config.database.backend {
        StorageBackend::Memory => Ok(Stores {
            otp: Arc::new(InMemoryOtpRepository::with_clock(clock)),
            callbacks: Arc::new(InMemoryCallbackRepository::new()),
            sms: Arc::new(InMemorySmsRepository::new()),
        }),
        StorageBackend::Mysql => {
            let database = DatabasePool::new(config.database.clone()).await?;
            database.run_migrations().await?;
            let pool = database.get_pool().clone();

            Ok(Stores {
                otp: Arc::new(MySqlOtpRepository::with_clock(pool.clone(), clock)),
                callbacks: Arc::new(MySqlCallbackRepository::new(pool.clone())),
                sms: Arc::new(MySqlSmsRepository::new(pool)),
            })
        }
    }
}

async fn build_throttle(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Arc<dyn RequestThrottle>, InfrastructureError> {
    let rate_limit = &config.rate_limit;
    if !rate_limit.enabled {
        tracing::warn!("Rate limiting disabled");
        return Ok(Arc::new(UnlimitedThrottle));
    }

    Ok(match rate_limit.backend {
        RateLimitBackend::Memory => Arc::new(SlidingWindowThrottle::with_clock(
            rate_limit.otp_requests_per_window,
            rate_limit.window_seconds,
            clock,
        )),
        RateLimitBackend::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            Arc::new(RedisSlidingWindowThrottle::with_clock(Arc::new(client), rate_limit, clock))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use og_core::errors::{DomainError, OtpError};
    use og_core::services::{GatewayService, SendOtpOutcome};

    #[tokio::test]
    async fn test_default_config_builds_in_memory_gateway() {
        let gateway = build_gateway(&AppConfig::default()).await.unwrap();

        let sent = gateway.send_otp("+15551230000").await.unwrap();
        assert_eq!(sent.outcome, SendOtpOutcome::Sent);
        assert!(sent.code.is_none());

        let health = gateway.health().await;
        assert_eq!(health.services["sms"].message.as_deref(), Some("mock"));
    }

    #[tokio::test]
    async fn test_configured_limit_is_enforced() {
        let mut config = AppConfig::default();
        config.rate_limit.otp_requests_per_window = 1;

        let gateway = build_gateway(&config).await.unwrap();
        gateway.send_sms("+15551230000", "first").await.unwrap();

        let err = gateway.send_sms("+15551230000", "second").await.unwrap_err();
        assert!(matches!(err, DomainError::Otp(OtpError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn test_disabled_rate_limit_admits_everything() {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        config.rate_limit.otp_requests_per_window = 1;

        let gateway = build_gateway(&config).await.unwrap();
        for _ in 0..3 {
            gateway.send_sms("+15551230000", "hello").await.unwrap();
        }
    }
}
