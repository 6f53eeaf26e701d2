use std::sync::Arc;

use vello_cpu::kurbo::{Shape, Stroke};

use crate::foundation::core::Point;
use crate::foundation::error::{InkError, InkResult};
use crate::render::surface::{Paint, Surface, SurfaceFactory};

#[derive(Clone, Copy, Debug)]
enum CpuOp {
    Line {
        from: Point,
        to: Point,
        width: f64,
        rgba: [u8; 4],
    },
    Quad {
        from: Point,
        ctrl: Point,
        to: Point,
        width: f64,
        rgba: [u8; 4],
    },
    Disc {
        center: Point,
        radius: f64,
        rgba: [u8; 4],
    },
}

/// Raster surface backed by a `vello_cpu` pixmap.
///
/// Drawing is buffered; [`Surface::present`] rasterizes only the operations drawn since the
/// previous present, on top of the pixels already presented.
pub struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    pending: Vec<CpuOp>,
    drawn: usize,
    has_pixels: bool,
}

impl CpuSurface {
    /// Allocate a transparent surface. Zero area or a side above `u16::MAX` is an error.
    pub fn new(width: u32, height: u32) -> InkResult<Self> {
        if width == 0 || height == 0 {
            return Err(InkError::surface(format!(
                "cannot allocate {width}x{height} surface with zero area"
            )));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| InkError::surface("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| InkError::surface("surface height exceeds u16"))?;
        Ok(Self {
            width: w,
            height: h,
            pixmap: vello_cpu::Pixmap::new(w, h),
            pending: Vec::new(),
            drawn: 0,
            has_pixels: false,
        })
    }

    /// Number of drawing operations since the last clear, presented or not.
    pub fn op_count(&self) -> usize {
        self.drawn
    }

    /// Operations drawn but not yet presented.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Premultiplied RGBA8 pixel data as last presented.
    pub fn premul_rgba8(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    fn push(&mut self, op: CpuOp) {
        self.pending.push(op);
        self.drawn += 1;
    }

    /// Seed `ctx` with the presented pixels so new operations composite over them.
    fn underlay_presented(&mut self, ctx: &mut vello_cpu::RenderContext) {
        let previous = std::mem::replace(
            &mut self.pixmap,
            vello_cpu::Pixmap::new(self.width, self.height),
        );
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(previous)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        u32::from(self.width)
    }

    fn height(&self) -> u32 {
        u32::from(self.height)
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.drawn = 0;
        self.has_pixels = false;
        clear_pixmap(&mut self.pixmap);
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, paint: &Paint) {
        let mid = from.midpoint(to);
        self.push(CpuOp::Line {
            from,
            to,
            width,
            rgba: paint.color_at(mid).to_rgba8(),
        });
    }

    fn stroke_quad(&mut self, from: Point, ctrl: Point, to: Point, width: f64, paint: &Paint) {
        let mid = from.midpoint(to).midpoint(ctrl);
        self.push(CpuOp::Quad {
            from,
            ctrl,
            to,
            width,
            rgba: paint.color_at(mid).to_rgba8(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.push(CpuOp::Disc {
            center,
            radius,
            rgba: paint.color_at(center).to_rgba8(),
        });
    }

    fn present(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        if self.has_pixels {
            self.underlay_presented(&mut ctx);
        }
        for op in self.pending.drain(..) {
            draw_op(&mut ctx, &op);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        self.has_pixels = true;
    }

    fn read_rgba8(&self) -> Option<Vec<u8>> {
        Some(unpremultiply(self.pixmap.data_as_u8_slice()))
    }
}

/// Allocates [`CpuSurface`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuSurfaceFactory;

impl SurfaceFactory for CpuSurfaceFactory {
    fn allocate(&mut self, width: u32, height: u32) -> InkResult<Box<dyn Surface>> {
        Ok(Box::new(CpuSurface::new(width, height)?))
    }
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &CpuOp) {
    match *op {
        CpuOp::Line {
            from,
            to,
            width,
            rgba,
        } => {
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(from));
            path.line_to(point_to_cpu(to));
            stroke(ctx, &path, width, rgba);
        }
        CpuOp::Quad {
            from,
            ctrl,
            to,
            width,
            rgba,
        } => {
            let mut path = vello_cpu::kurbo::BezPath::new();
            path.move_to(point_to_cpu(from));
            path.quad_to(point_to_cpu(ctrl), point_to_cpu(to));
            stroke(ctx, &path, width, rgba);
        }
        CpuOp::Disc {
            center,
            radius,
            rgba,
        } => {
            if radius <= 0.0 {
                return;
            }
            set_color(ctx, rgba);
            let disc = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius);
            ctx.fill_path(&disc.to_path(0.1));
        }
    }
}

fn stroke(ctx: &mut vello_cpu::RenderContext, path: &vello_cpu::kurbo::BezPath, width: f64, rgba: [u8; 4]) {
    if width <= 0.0 {
        return;
    }
    set_color(ctx, rgba);
    ctx.set_stroke(
        Stroke::new(width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round),
    );
    ctx.stroke_path(path);
}

fn set_color(ctx: &mut vello_cpu::RenderContext, [r, g, b, a]: [u8; 4]) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

/// Convert premultiplied RGBA8 to straight alpha.
pub(crate) fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(premul.len());
    for px in premul.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let un = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
        out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
