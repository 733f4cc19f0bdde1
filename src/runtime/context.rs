use std::path::PathBuf;
use std::sync::Arc;

use crate::export::ExportWriter;
use crate::profile::ProfileStore;
use crate::segment::SegmentationBackend;

use super::io_service::IoService;
use super::profile_service::ProfileService;
use super::segment_service::SegmentService;

/// Central access point for all application services.
#[derive(Debug, Clone, Default)]
pub struct AppContext {
    io_service: IoService,
    segment_service: SegmentService,
    profile_service: ProfileService,
    export_writer: ExportWriter,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: Arc<dyn SegmentationBackend>) -> Self {
        self.segment_service = SegmentService::with_backend(backend);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_writer = ExportWriter::with_output_dir(dir);
        self
    }

    pub fn with_profile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.profile_service = ProfileService::with_store(ProfileStore::with_dir(dir));
        self
    }

    pub fn io_service(&self) -> &IoService {
        &self.io_service
    }

    pub fn segment_service(&self) -> &SegmentService {
        &self.segment_service
    }

    pub fn profile_service(&self) -> &ProfileService {
        &self.profile_service
    }

    pub fn export_writer(&self) -> &ExportWriter {
        &self.export_writer
    }
}
