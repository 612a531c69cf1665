//! wgpu surface provider.
//!
//! Opens a headless device and renders each pass as a single fullscreen
//! triangle into an `Rgba8Unorm` texture.

use image::RgbaImage;
use wgpu::util::DeviceExt;

use crate::error::{GraphicsError, GraphicsResult};
use crate::shader::kernel_source;
use crate::types::{BlurKernel, Extent2d, KernelParams, PassKind};

use super::SurfaceProvider;

const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Uniform block matching `KernelParams` in the WGSL sources.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct KernelUniform {
    resolution: [f32; 2],
    offset: f32,
    _padding: f32,
}

impl From<KernelParams> for KernelUniform {
    fn from(params: KernelParams) -> Self {
        Self {
            resolution: params.resolution,
            offset: params.offset,
            _padding: 0.0,
        }
    }
}

/// Surface handed out by [`WgpuBackend`].
#[derive(Debug)]
pub struct WgpuSurface {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    extent: Extent2d,
}

impl WgpuSurface {
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

struct Pipelines {
    capture: wgpu::RenderPipeline,
    downsample: wgpu::RenderPipeline,
    upsample: wgpu::RenderPipeline,
}

/// wgpu-based surface provider.
pub struct WgpuBackend {
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    pipelines: Pipelines,
}

impl std::fmt::Debug for WgpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuBackend")
            .field("adapter", &self.adapter.get_info().name)
            .finish()
    }
}

impl WgpuBackend {
    /// Open a headless device and build the blur pipelines.
    pub fn new() -> GraphicsResult<Self> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| GraphicsError::DeviceUnavailable("no compatible GPU adapter".into()))?;

        log::info!("wgpu adapter: {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("polyblur device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
            },
            None,
        ))
        .map_err(|e| GraphicsError::DeviceUnavailable(format!("device creation failed: {e}")))?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("blur bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("blur sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("blur pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let unused = KernelParams {
            resolution: [1.0, 1.0],
            offset: 0.0,
        };
        let pipelines = Pipelines {
            capture: create_pipeline(&device, &layout, PassKind::Capture),
            downsample: create_pipeline(
                &device,
                &layout,
                PassKind::Kernel(BlurKernel::Downsample, unused),
            ),
            upsample: create_pipeline(
                &device,
                &layout,
                PassKind::Kernel(BlurKernel::Upsample, unused),
            ),
        };

        Ok(Self {
            adapter,
            device,
            queue,
            bind_group_layout,
            sampler,
            pipelines,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Create a surface holding `image`.
    pub fn upload_image(&mut self, image: &RgbaImage) -> GraphicsResult<WgpuSurface> {
        let extent = Extent2d::new(image.width(), image.height());
        let surface = self.create_surface(extent, "uploaded image")?;
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &surface.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * extent.width),
                rows_per_image: Some(extent.height),
            },
            to_wgpu_extent(extent),
        );
        Ok(surface)
    }

    /// Copy a surface back to the CPU.
    pub fn read_image(&self, surface: &WgpuSurface) -> GraphicsResult<RgbaImage> {
        let extent = surface.extent;
        let unpadded = 4 * extent.width;
        let padded = aligned_bytes_per_row(unpadded);

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback buffer"),
            size: padded as u64 * extent.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &surface.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(extent.height),
                },
            },
            to_wgpu_extent(extent),
        );
        self.queue.submit(Some(encoder.finish()));

        let slice = buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        let _ = self.device.poll(wgpu::Maintain::Wait);
        receiver
            .recv()
            .map_err(|e| GraphicsError::Backend(format!("readback channel closed: {e}")))?
            .map_err(|e| GraphicsError::Backend(format!("buffer map failed: {e}")))?;

        let mapped = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded * extent.height) as usize);
        for row in mapped.chunks(padded as usize) {
            pixels.extend_from_slice(&row[..unpadded as usize]);
        }
        drop(mapped);
        buffer.unmap();

        RgbaImage::from_raw(extent.width, extent.height, pixels)
            .ok_or_else(|| GraphicsError::Backend("readback size mismatch".into()))
    }

    fn pipeline(&self, pass: PassKind) -> &wgpu::RenderPipeline {
        match pass {
            PassKind::Capture => &self.pipelines.capture,
            PassKind::Kernel(BlurKernel::Downsample, _) => &self.pipelines.downsample,
            PassKind::Kernel(BlurKernel::Upsample, _) => &self.pipelines.upsample,
        }
    }
}

impl SurfaceProvider for WgpuBackend {
    type Surface = WgpuSurface;

    fn name(&self) -> &'static str {
        "wgpu Backend"
    }

    fn create_surface(&mut self, extent: Extent2d, label: &str) -> GraphicsResult<WgpuSurface> {
        if extent.is_empty() {
            return Err(GraphicsError::InvalidSurface {
                width: extent.width,
                height: extent.height,
            });
        }
        let limit = self.device.limits().max_texture_dimension_2d;
        if extent.width > limit || extent.height > limit {
            return Err(GraphicsError::ResourceCreationFailed(format!(
                "{label}: {extent} exceeds max texture size {limit}"
            )));
        }

        log::trace!("WgpuBackend: creating surface {:?} ({})", label, extent);
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: to_wgpu_extent(extent),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SURFACE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(WgpuSurface {
            texture,
            view,
            extent,
        })
    }

    fn release_surface(&mut self, surface: WgpuSurface) {
        log::trace!("WgpuBackend: releasing surface ({})", surface.extent);
        surface.texture.destroy();
    }

    fn extent(&self, surface: &WgpuSurface) -> Extent2d {
        surface.extent
    }

    fn render(
        &mut self,
        source: &WgpuSurface,
        target: &mut WgpuSurface,
        pass: PassKind,
    ) -> GraphicsResult<()> {
        log::trace!(
            "WgpuBackend: {} pass {} -> {}",
            pass.label(),
            source.extent,
            target.extent
        );

        let params = match pass {
            PassKind::Capture => KernelParams::new(source.extent, 0.0),
            PassKind::Kernel(_, params) => params,
        };
        let uniform = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("kernel params"),
                contents: bytemuck::bytes_of(&KernelUniform::from(params)),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("blur bind group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&source.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some(pass.label()),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(pass.label()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(self.pipeline(pass));
            render_pass.set_bind_group(0, &bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        Ok(())
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    pass: PassKind,
) -> wgpu::RenderPipeline {
    let source = kernel_source(pass);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(pass.label()),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(pass.label()),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format: SURFACE_FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

fn to_wgpu_extent(extent: Extent2d) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width: extent.width,
        height: extent.height,
        depth_or_array_layers: 1,
    }
}

/// Round a row size up to wgpu's copy alignment (256 bytes).
fn aligned_bytes_per_row(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_alignment() {
        assert_eq!(aligned_bytes_per_row(4), 256);
        assert_eq!(aligned_bytes_per_row(256), 256);
        assert_eq!(aligned_bytes_per_row(1028), 1280);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<KernelUniform>(), 16);
    }
}
