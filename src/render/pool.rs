use std::collections::HashMap;

use resvg::tiny_skia;

use crate::foundation::error::{ShapeClipError, ShapeClipResult};

/// Mutable premultiplied RGBA8 raster used for all intermediate and final output.
pub type PixelBuffer = tiny_skia::Pixmap;

/// Source of reusable pixel buffers.
///
/// Buffers returned by [`BufferPool::acquire`] are fully transparent. Every buffer that is not
/// handed back to the caller as a result must be passed to [`BufferPool::release`].
pub trait BufferPool {
    /// Obtain a transparent `width x height` buffer.
    fn acquire(&mut self, width: u32, height: u32) -> ShapeClipResult<PixelBuffer>;
    /// Return a buffer for reuse.
    fn release(&mut self, buffer: PixelBuffer);
}

fn allocate(width: u32, height: u32) -> ShapeClipResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(ShapeClipError::InvalidDimensions { width, height });
    }
    tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ShapeClipError::out_of_memory(width, height))
}

/// Pool that always allocates and drops released buffers.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapPool;

impl BufferPool for HeapPool {
    fn acquire(&mut self, width: u32, height: u32) -> ShapeClipResult<PixelBuffer> {
        allocate(width, height)
    }

    fn release(&mut self, _buffer: PixelBuffer) {}
}

/// Capacity limits for [`BoundedPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedPoolOpts {
    /// Maximum bytes retained across all buckets.
    pub max_pool_bytes: usize,
    /// Maximum number of retained buffers per `(width, height)` bucket.
    pub max_buffers_per_bucket: usize,
}

impl Default for BoundedPoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 64 * 1024 * 1024,
            max_buffers_per_bucket: 4,
        }
    }
}

impl BoundedPoolOpts {
    /// Defaults overridden by `SHAPECLIP_POOL_MAX_BYTES` and `SHAPECLIP_POOL_MAX_PER_BUCKET`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
        };
        Self {
            max_pool_bytes: read("SHAPECLIP_POOL_MAX_BYTES").unwrap_or(defaults.max_pool_bytes),
            max_buffers_per_bucket: read("SHAPECLIP_POOL_MAX_PER_BUCKET")
                .unwrap_or(defaults.max_buffers_per_bucket),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BufferKey {
    w: u32,
    h: u32,
}

impl BufferKey {
    fn byte_len(self) -> usize {
        (self.w as usize)
            .saturating_mul(self.h as usize)
            .saturating_mul(4)
    }
}

/// Counters describing pool behavior.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers currently held for reuse.
    pub retained_buffers: usize,
    /// Bytes currently held for reuse.
    pub retained_bytes: usize,
    /// Buffers allocated fresh.
    pub alloc_buffers: u64,
    /// Bytes allocated fresh.
    pub alloc_bytes: u64,
    /// Acquisitions served from a bucket.
    pub reused_buffers: u64,
    /// Released buffers dropped because a cap was reached.
    pub dropped_on_release: u64,
}

/// Bounded buffer pool bucketed by `(width, height)`.
#[derive(Debug)]
pub struct BoundedPool {
    opts: BoundedPoolOpts,
    stats: PoolStats,
    buckets: HashMap<BufferKey, Vec<PixelBuffer>>,
}

impl Default for BoundedPool {
    fn default() -> Self {
        Self::new(BoundedPoolOpts::default())
    }
}

impl BoundedPool {
    /// Create an empty pool with the given limits.
    pub fn new(opts: BoundedPoolOpts) -> Self {
        Self {
            opts,
            stats: PoolStats::default(),
            buckets: HashMap::new(),
        }
    }

    /// Current counters.
    pub fn stats(&self) -> PoolStats {
        self.stats.clone()
    }

    /// Configured limits.
    pub fn opts(&self) -> BoundedPoolOpts {
        self.opts
    }

    fn drop_released(&mut self) {
        self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
    }
}

impl BufferPool for BoundedPool {
    fn acquire(&mut self, width: u32, height: u32) -> ShapeClipResult<PixelBuffer> {
        let key = BufferKey {
            w: width,
            h: height,
        };
        if let Some(mut buf) = self.buckets.get_mut(&key).and_then(Vec::pop) {
            self.stats.retained_buffers = self.stats.retained_buffers.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(key.byte_len());
            self.stats.reused_buffers = self.stats.reused_buffers.saturating_add(1);
            buf.fill(tiny_skia::Color::TRANSPARENT);
            return Ok(buf);
        }

        let buf = allocate(width, height)?;
        self.stats.alloc_buffers = self.stats.alloc_buffers.saturating_add(1);
        self.stats.alloc_bytes = self.stats.alloc_bytes.saturating_add(key.byte_len() as u64);
        tracing::debug!(width, height, "pool allocated buffer");
        Ok(buf)
    }

    fn release(&mut self, buffer: PixelBuffer) {
        if self.opts.max_pool_bytes == 0 || self.opts.max_buffers_per_bucket == 0 {
            self.drop_released();
            return;
        }

        let key = BufferKey {
            w: buffer.width(),
            h: buffer.height(),
        };
        let bytes = key.byte_len();
        if self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes {
            self.drop_released();
            return;
        }

        let bucket = self.buckets.entry(key).or_default();
        if bucket.len() >= self.opts.max_buffers_per_bucket {
            self.drop_released();
            return;
        }

        bucket.push(buffer);
        self.stats.retained_buffers = self.stats.retained_buffers.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;
