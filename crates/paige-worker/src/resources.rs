//! Process-wide resources shared by every call a worker handles.

use std::{fmt, sync::Arc};

use paige_core::traits::AppointmentSink;

use crate::vad::VadModel;

/// Built once by `Worker::prewarm` and cloned into every job.
///
/// Clones are cheap: both fields are reference counted.
#[derive(Clone)]
pub struct ProcessResources {
    pub vad: Arc<VadModel>,
    /// The appointment store all calls append to.
    pub appointments: Arc<dyn AppointmentSink>,
}

impl ProcessResources {
    pub fn new(vad: VadModel, appointments: Arc<dyn AppointmentSink>) -> Self {
        Self {
            vad: Arc::new(vad),
            appointments,
        }
    }
}

impl fmt::Debug for ProcessResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessResources")
            .field("vad", &self.vad)
            .finish_non_exhaustive()
    }
}
