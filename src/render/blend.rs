use crate::foundation::core::Resolution;
use crate::foundation::error::{TrailError, TrailResult};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over of `src` onto `dst`, with `src` scaled by a constant `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    match opacity_weight(opacity) {
        Some(op) => over_weighted(dst, src, op),
        None => dst,
    }
}

/// Blend an equally sized premultiplied RGBA8 buffer over `dst`.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> TrailResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TrailError::surface(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    let Some(op) = opacity_weight(opacity) else {
        return Ok(());
    };
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over_weighted([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], op);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Blend `src` over `dst`, stretching `src` to cover all of `dst` (nearest-neighbour).
pub fn over_scaled_in_place(
    dst: &mut [u8],
    dst_res: Resolution,
    src: &[u8],
    src_res: Resolution,
    opacity: f32,
) -> TrailResult<()> {
    if dst.len() != dst_res.rgba8_len() || src.len() != src_res.rgba8_len() {
        return Err(TrailError::surface(
            "over_scaled_in_place buffer length does not match its resolution",
        ));
    }
    if dst_res == src_res {
        return over_in_place(dst, src, opacity);
    }

    let Some(op) = opacity_weight(opacity) else {
        return Ok(());
    };

    let dw = dst_res.width as usize;
    let (sw, sh) = (src_res.width as u64, src_res.height as u64);
    for (y, row) in dst.chunks_exact_mut(dw * 4).enumerate() {
        let sy = (y as u64 * sh / u64::from(dst_res.height)) as usize;
        for (x, d) in row.chunks_exact_mut(4).enumerate() {
            let sx = (x as u64 * sw / u64::from(dst_res.width)) as usize;
            let i = (sy * sw as usize + sx) * 4;
            let out = over_weighted(
                [d[0], d[1], d[2], d[3]],
                [src[i], src[i + 1], src[i + 2], src[i + 3]],
                op,
            );
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Nearest-neighbour copy of `src` into `dst`, replacing its contents.
pub fn resample_nearest(dst: &mut [u8], dst_res: Resolution, src: &[u8], src_res: Resolution) {
    if dst_res == src_res && dst.len() == src.len() {
        dst.copy_from_slice(src);
        return;
    }
    let dw = dst_res.width as usize;
    let (sw, sh) = (src_res.width as u64, src_res.height as u64);
    for (y, row) in dst.chunks_exact_mut(dw * 4).enumerate() {
        let sy = (y as u64 * sh / u64::from(dst_res.height)) as usize;
        for (x, d) in row.chunks_exact_mut(4).enumerate() {
            let sx = (x as u64 * sw / u64::from(dst_res.width)) as usize;
            let i = (sy * sw as usize + sx) * 4;
            d.copy_from_slice(&src[i..i + 4]);
        }
    }
}

/// Quantize a layer opacity to an 8-bit weight; `None` when the layer is invisible.
fn opacity_weight(opacity: f32) -> Option<u16> {
    let op = (opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
    (op > 0).then_some(op)
}

fn over_weighted(dst: PremulRgba8, src: PremulRgba8, op: u16) -> PremulRgba8 {
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255 - u16::from(sa);
    let blend = |s: u8, d: u8| {
        mul_div255(u16::from(s), op).saturating_add(mul_div255(u16::from(d), inv))
    };
    [
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        sa.saturating_add(mul_div255(u16::from(dst[3]), inv)),
    ]
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
