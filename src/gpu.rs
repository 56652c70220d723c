//! GPU context acquisition.
//!
//! Mirrors the blocking adapter/device bring-up used when embedding behind a
//! foreign event loop: no async runtime, just `pollster` around the wgpu
//! futures. Surface creation stays on the host side; this handle only owns
//! the instance, adapter, and device/queue pair.

use crate::error::EngineError;

pub struct GpuContext {
    _instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuContext {
    /// Bring up an adapter and device. `None`-adapter hosts (headless CI,
    /// driverless containers) surface as a recoverable error.
    pub fn new() -> Result<Self, EngineError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: None,
        }))
        .ok_or(EngineError::NoAdapter)?;

        log::info!("gpu context: using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("quill-gpu-context"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        Ok(Self {
            _instance: instance,
            adapter,
            device,
            queue,
        })
    }

    /// Flush queued work; optionally block until the device is idle.
    pub fn flush_and_submit(&self, wait: bool) {
        self.queue.submit(std::iter::empty());
        if wait {
            let _ = self.device.poll(wgpu::Maintain::Wait);
        }
    }

    pub fn adapter_name(&self) -> String {
        self.adapter.get_info().name
    }
}
