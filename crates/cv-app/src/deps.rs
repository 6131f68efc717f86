//! # Photo Service Dependencies / 照片服务依赖
//!
//! Parameter grouping for [`PhotoService`](crate::PhotoService) construction.
//! Every port is required; there are no defaults.
//! 所有依赖都是必需的，无默认值。

use std::sync::Arc;

use cv_core::ports::*;

pub struct PhotoServiceDeps {
    // Storage / 存储
    pub connector: Arc<dyn StorageConnectorPort>,
    pub storage_estimate: Arc<dyn StorageEstimatePort>,

    // Handles / 句柄
    pub object_urls: Arc<dyn ObjectUrlPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
    pub id_generator: Arc<dyn PhotoIdGeneratorPort>,
}
