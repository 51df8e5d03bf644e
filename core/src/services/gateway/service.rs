//! Gateway facade and lifecycle

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use og_shared::config::AppConfig;
use og_shared::types::{HealthResponse, ServiceHealth};

use crate::clock::{Clock, SystemClock};
use crate::domain::entities::{CallbackPriority, CallbackRequest, CallbackStatus};
use crate::domain::value_objects::{ActivityLog, OtpStatus};
use crate::errors::DomainResult;
use crate::repositories::{
    CallbackRepository, InMemoryCallbackRepository, InMemoryOtpRepository, InMemorySmsRepository, OtpRepository,
    SmsRepository,
};
use crate::services::bounded::store_call;
use crate::services::callback::CallbackService;
use crate::services::logs::LogsService;
use crate::services::otp::{
    OtpReaper, OtpService, OtpServiceConfig, ReaperHandle, SendOtpResult, SmsServiceTrait, VerifyOtpResult,
};
use crate::services::sms_message::{SendSmsResult, SmsMessageService};
use crate::services::throttle::{RequestThrottle, SlidingWindowThrottle, UnlimitedThrottle};

/// Every operation the gateway exposes
///
/// The HTTP layer depends on this trait only.
#[async_trait]
pub trait GatewayService: Send + Sync {
    async fn send_otp(&self, phone: &str) -> DomainResult<SendOtpResult>;

    async fn verify_otp(&self, phone: &str, code: &str) -> DomainResult<VerifyOtpResult>;

    async fn otp_status(&self, phone: &str) -> DomainResult<OtpStatus>;

    async fn send_sms(&self, phone: &str, message: &str) -> DomainResult<SendSmsResult>;

    async fn request_callback(
        &self,
        phone: &str,
        message: Option<&str>,
        priority: Option<CallbackPriority>,
    ) -> DomainResult<CallbackRequest>;

    async fn get_callback_status(&self, request_id: &str) -> DomainResult<CallbackRequest>;

    async fn update_callback_status(&self, request_id: &str, status: CallbackStatus) -> DomainResult<CallbackRequest>;

    async fn get_logs(&self, limit: Option<usize>) -> DomainResult<ActivityLog>;

    async fn health(&self) -> HealthResponse;
}

/// Tunables for the gateway services
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub otp: OtpServiceConfig,
    /// Period of the expiry sweep
    pub cleanup_interval: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            otp: OtpServiceConfig::default(),
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

impl From<&AppConfig> for GatewayConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            otp: OtpServiceConfig::from(&config.otp),
            cleanup_interval: Duration::from_secs(config.otp.cleanup_interval_seconds.max(1)),
        }
    }
}

/// Collaborators injected into the gateway
pub struct GatewayDependencies {
    pub otp_repository: Arc<dyn OtpRepository>,
    pub callback_repository: Arc<dyn CallbackRepository>,
    pub sms_repository: Arc<dyn SmsRepository>,
    pub sms_service: Arc<dyn SmsServiceTrait>,
    pub throttle: Arc<dyn RequestThrottle>,
    pub clock: Arc<dyn Clock>,
}

impl GatewayDependencies {
    /// In-memory stores and throttle around the given transport
    pub fn in_memory(sms_service: Arc<dyn SmsServiceTrait>, limit: Option<(u32, u64)>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let throttle: Arc<dyn RequestThrottle> = match limit {
            Some((requests, window_seconds)) => {
                Arc::new(SlidingWindowThrottle::with_clock(requests, window_seconds, clock.clone()))
            }
            None => Arc::new(UnlimitedThrottle),
        };

        Self {
            otp_repository: Arc::new(InMemoryOtpRepository::with_clock(clock.clone())),
            callback_repository: Arc::new(InMemoryCallbackRepository::new()),
            sms_repository: Arc::new(InMemorySmsRepository::new()),
            sms_service,
            throttle,
            clock,
        }
    }
}

/// Gateway owning the services and the reaper task
pub struct Gateway {
    otp: Arc<OtpService>,
    sms: Arc<SmsMessageService>,
    callbacks: Arc<CallbackService>,
    logs: LogsService,
    reaper: Arc<OtpReaper>,
    reaper_handle: Mutex<Option<ReaperHandle>>,
    otp_repository: Arc<dyn OtpRepository>,
    provider: String,
    operation_timeout: Duration,
}

impl Gateway {
    pub fn new(deps: GatewayDependencies, config: GatewayConfig) -> Self {
        let timeout = config.otp.operation_timeout;

        let otp = Arc::new(OtpService::new(
            deps.otp_repository.clone(),
            deps.sms_service.clone(),
            deps.throttle.clone(),
            deps.clock.clone(),
            config.otp,
        ));
        let sms = Arc::new(SmsMessageService::new(
            deps.sms_repository,
            deps.sms_service.clone(),
            deps.throttle,
            deps.clock.clone(),
            timeout,
        ));
        let callbacks = Arc::new(CallbackService::new(deps.callback_repository, deps.clock.clone(), timeout));
        let logs = LogsService::new(otp.clone(), callbacks.clone(), sms.clone(), deps.clock.clone());
        let reaper = Arc::new(OtpReaper::new(
            deps.otp_repository.clone(),
            deps.clock,
            config.cleanup_interval,
            timeout,
        ));

        Self {
            otp,
            sms,
            callbacks,
            logs,
            reaper,
            reaper_handle: Mutex::new(None),
            otp_repository: deps.otp_repository,
            provider: deps.sms_service.provider_name().to_string(),
            operation_timeout: timeout,
        }
    }

    /// Start the expiry reaper; a no-op when already running
    pub async fn start(&self, shutdown: CancellationToken) {
        let mut slot = self.reaper_handle.lock().await;
        if slot.as_ref().is_some_and(|h| h.is_running()) {
            return;
        }
        *slot = Some(self.reaper.clone().start(shutdown.child_token()));
    }

    /// Stop the reaper and wait for it
    pub async fn shutdown(&self) {
        if let Some(handle) = self.reaper_handle.lock().await.take() {
            handle.shutdown().await;
        }
    }

    /// Direct access to the reaper for manual sweeps
    pub fn reaper(&self) -> &OtpReaper {
        &self.reaper
    }
}

#[async_trait]
impl GatewayService for Gateway {
    async fn send_otp(&self, phone: &str) -> DomainResult<SendOtpResult> {
        self.otp.send_otp(phone).await
    }

    async fn verify_otp(&self, phone: &str, code: &str) -> DomainResult<VerifyOtpResult> {
        self.otp.verify_otp(phone, code).await
    }

    async fn otp_status(&self, phone: &str) -> DomainResult<OtpStatus> {
        self.otp.otp_status(phone).await
    }

    async fn send_sms(&self, phone: &str, message: &str) -> DomainResult<SendSmsResult> {
        self.sms.send_sms(phone, message).await
    }

    async fn request_callback(
        &self,
        phone: &str,
        message: Option<&str>,
        priority: Option<CallbackPriority>,
    ) -> DomainResult<CallbackRequest> {
        self.callbacks.request_callback(phone, message, priority).await
    }

    async fn get_callback_status(&self, request_id: &str) -> DomainResult<CallbackRequest> {
        self.callbacks.get_callback_status(request_id).await
    }

    async fn update_callback_status(&self, request_id: &str, status: CallbackStatus) -> DomainResult<CallbackRequest> {
        self.callbacks.update_callback_status(request_id, status).await
    }

    async fn get_logs(&self, limit: Option<usize>) -> DomainResult<ActivityLog> {
        self.logs.get_logs(limit).await
    }

    async fn health(&self) -> HealthResponse {
        let mut services = HashMap::new();

        let storage = match store_call(self.operation_timeout, "health", self.otp_repository.find_all(1)).await {
            Ok(_) => ServiceHealth::healthy(),
            Err(e) => ServiceHealth::unhealthy(e.to_string()),
        };
        services.insert("storage".to_string(), storage);

        services.insert(
            "sms".to_string(),
            ServiceHealth::healthy().with_message(self.provider.clone()),
        );

        let reaper_running = self
            .reaper_handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|h| h.is_running());
        let reaper = if reaper_running {
            ServiceHealth::healthy()
        } else {
            ServiceHealth::degraded("expiry reaper not running")
        };
        services.insert("reaper".to_string(), reaper);

        HealthResponse::from_services(services, env!("CARGO_PKG_VERSION"))
    }
}
