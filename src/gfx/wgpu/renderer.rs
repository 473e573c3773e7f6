//! wgpu 渲染器实现
//!
//! 本模块实现了基于 wgpu 的渲染器，包括：
//! - 渲染管线创建
//! - 资源管理（顶点缓冲、索引缓冲、Uniform缓冲、深度纹理）
//! - 相机和光照集成
//!
//! 场景每帧在 CPU 侧合批成世界空间几何，整体写入顶点/索引缓冲，一次绘制完成。

use bytemuck::{Pod, Zeroable};
use tracing::{debug, info, warn};
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::component::{Camera, Light};
use crate::core::error::{GraphicsError, Result};
use crate::core::scene::SceneConfig;
use crate::core::{Config, Matrix4};
use crate::gfx::wgpu::backend::WgpuBackend;
use crate::renderer::vertex::{linear_rgb, GpuVertex};
use crate::renderer::{FrameBatch, FrameRenderer, SceneLighting};
use crate::scene::SceneGraph;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform Buffer Object - 视图投影矩阵和光照数据
///
/// 必须使用 #[repr(C)] 保证内存布局与着色器一致。
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct UniformBufferObject {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
}

impl UniformBufferObject {
    fn new(view_proj: &Matrix4, lighting: &SceneLighting) -> Self {
        let d = lighting.sun.direction;
        Self {
            view_proj: *view_proj.as_ref(),
            light_dir: [d.x, d.y, d.z, 0.0],
            light_color: scaled(&lighting.sun),
            ambient: scaled(&lighting.ambient),
        }
    }
}

fn scaled(light: &dyn Light) -> [f32; 4] {
    let c = linear_rgb(&light.color());
    let i = light.intensity();
    [c[0] * i, c[1] * i, c[2] * i, 1.0]
}

/// 按需扩容的 GPU 缓冲
struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    usage: wgpu::BufferUsages,
    label: &'static str,
}

impl DynamicBuffer {
    fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages, capacity: u64) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let capacity = capacity.max(wgpu::COPY_BUFFER_ALIGNMENT);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: capacity,
            usage,
            mapped_at_creation: false,
        });
        Self { buffer, capacity, usage, label }
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            let capacity = needed.next_power_of_two();
            debug!(label = self.label, capacity, "Growing buffer");
            *self = Self::new(device, self.label, self.usage, capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// wgpu 渲染器
pub struct Renderer {
    gfx: WgpuBackend,

    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: DynamicBuffer,
    index_buffer: DynamicBuffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,

    lighting: SceneLighting,
    batch: FrameBatch,
    frames: u64,
}

impl Renderer {
    /// 创建窗口、设备和渲染管线
    pub fn new(event_loop: &EventLoop<()>, config: &Config, scene: &SceneConfig) -> Result<Self> {
        info!("Creating wgpu renderer");

        // 1. 创建 wgpu 后端
        let gfx = WgpuBackend::new(event_loop, config)?;
        let device = &gfx.device;

        // 2. 加载着色器模块
        debug!("Loading shaders");
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Main Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../renderer/shaders/shader.wgsl").into()),
        });

        // 3. Uniform Buffer 和 Bind Group
        debug!("Creating uniform buffer");
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<UniformBufferObject>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // 4. 深度纹理
        let (width, height) = gfx.size();
        let depth_view = create_depth_view(device, width, height);

        // 5. 渲染管线
        // 半球、开口圆柱和地面需要双面可见，因此不剔除
        debug!("Creating render pipeline");
        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[GpuVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: gfx.surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // 6. 几何缓冲，首帧按需扩容
        let vertex_buffer = DynamicBuffer::new(device, "Vertex Buffer", wgpu::BufferUsages::VERTEX, 1 << 16);
        let index_buffer = DynamicBuffer::new(device, "Index Buffer", wgpu::BufferUsages::INDEX, 1 << 16);

        let lighting = SceneLighting::from_config(scene);
        info!(
            ambient = lighting.ambient.intensity(),
            sun_intensity = lighting.sun.intensity(),
            direction = ?lighting.sun.direction,
            "Lighting initialized"
        );

        info!("wgpu renderer created successfully");

        Ok(Self {
            gfx,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            bind_group,
            depth_view,
            lighting,
            batch: FrameBatch::new(),
            frames: 0,
        })
    }

    /// 获取窗口引用
    pub fn window(&self) -> &Window {
        self.gfx.window()
    }

    /// 获取交换链图像；表面丢失时重新配置并跳过本帧
    fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
        match self.gfx.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.gfx.size();
                warn!("Surface lost, reconfiguring {}x{}", w, h);
                self.gfx.reconfigure_surface(w, h);
                Ok(None)
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Timed out acquiring next image");
                Ok(None)
            }
            Err(e) => Err(GraphicsError::SwapchainError(format!("Failed to acquire next image: {}", e)).into()),
        }
    }
}

impl FrameRenderer for Renderer {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera) -> Result<()> {
        // 1. 合批并上传几何
        self.batch.rebuild(scene);
        self.vertex_buffer
            .write(&self.gfx.device, &self.gfx.queue, bytemuck::cast_slice(&self.batch.vertices));
        self.index_buffer
            .write(&self.gfx.device, &self.gfx.queue, bytemuck::cast_slice(&self.batch.indices));

        // 2. 更新 uniform
        let ubo = UniformBufferObject::new(&camera.view_proj(), &self.lighting);
        self.gfx.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[ubo]));

        // 3. 获取交换链纹理
        let Some(output) = self.acquire()? else {
            return Ok(());
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.gfx.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let clear = linear_rgb(&self.lighting.clear_color);

        // 4. 渲染通道
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear[0] as f64,
                            g: clear[1] as f64,
                            b: clear[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.batch.is_empty() {
                let vertex_bytes = std::mem::size_of_val(self.batch.vertices.as_slice()) as u64;
                let index_bytes = std::mem::size_of_val(self.batch.indices.as_slice()) as u64;
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer.slice(..vertex_bytes));
                render_pass.set_index_buffer(self.index_buffer.buffer.slice(..index_bytes), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.batch.indices.len() as u32, 0, 0..1);
            }
        }

        // 5. 提交命令
        self.gfx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.frames += 1;

        Ok(())
    }

    /// 处理窗口大小调整
    fn resize(&mut self, width: u32, height: u32) {
        if self.gfx.reconfigure_surface(width, height) {
            debug!("Resizing to {}x{}", width, height);
            self.depth_view = create_depth_view(&self.gfx.device, width, height);
        }
    }

    fn frames_rendered(&self) -> u64 {
        self.frames
    }
}
