use std::{path::Path, sync::mpsc};

use image::RgbaImage;
use vello::wgpu;

use crate::{
  error::{PlotError, Result},
  render::{GpuHandle, RenderConfig},
};

/// Copies the rendered texture back from the GPU and writes it out as an image.
pub fn save(handle: &GpuHandle, config: &RenderConfig, path: &Path) -> Result<()> {
  let row_bytes = 4 * config.width;
  let padded_row_bytes = row_bytes.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

  let buffer = handle.device.create_buffer(&wgpu::BufferDescriptor {
    label:              Some("Output Buffer"),
    size:               u64::from(padded_row_bytes * config.height),
    usage:              wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
    mapped_at_creation: false,
  });

  let mut encoder = handle.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
    label: Some("texture_buffer_copy_encoder"),
  });

  encoder.copy_texture_to_buffer(
    wgpu::TexelCopyTextureInfo {
      texture:   &handle.texture,
      mip_level: 0,
      origin:    wgpu::Origin3d::ZERO,
      aspect:    wgpu::TextureAspect::All,
    },
    wgpu::TexelCopyBufferInfo {
      buffer: &buffer,
      layout: wgpu::TexelCopyBufferLayout {
        offset:         0,
        bytes_per_row:  Some(padded_row_bytes),
        rows_per_image: Some(config.height),
      },
    },
    config.extent_3d(),
  );

  handle.queue.submit(std::iter::once(encoder.finish()));

  let buffer_slice = buffer.slice(..);
  let (tx, rx) = mpsc::channel();
  buffer_slice.map_async(wgpu::MapMode::Read, move |res| {
    let _ = tx.send(res);
  });
  handle.device.poll(wgpu::PollType::Wait).map_err(PlotError::gpu)?;
  rx.recv().map_err(PlotError::gpu)?.map_err(PlotError::gpu)?;

  let pixels = {
    let data = buffer_slice.get_mapped_range();
    unpad_rows(&data, row_bytes as usize, padded_row_bytes as usize)
  };
  buffer.unmap();

  let image = RgbaImage::from_raw(config.width, config.height, pixels)
    .ok_or_else(|| PlotError::gpu("texture readback has the wrong size"))?;
  image.save(path)?;
  Ok(())
}

fn unpad_rows(data: &[u8], row_bytes: usize, padded_row_bytes: usize) -> Vec<u8> {
  data.chunks(padded_row_bytes).flat_map(|row| &row[..row_bytes]).copied().collect()
}
