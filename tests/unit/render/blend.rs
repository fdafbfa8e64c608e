use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_on_transparent_halves_src() {
    let dst = [0, 0, 0, 0];
    let src = [255, 255, 255, 255];
    // 0.5 * 255 rounds to 128.
    assert_eq!(over(dst, src, 0.5), [128, 128, 128, 128]);
}

#[test]
fn repeated_draws_accumulate_opacity() {
    let src = [255, 255, 255, 255];
    let once = over([0, 0, 0, 0], src, 0.25);
    let twice = over(once, src, 0.25);
    assert!(twice[3] > once[3]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
}

#[test]
fn buffer_blend_matches_per_pixel_over() {
    let src = [40u8, 80, 120, 160, 255, 0, 0, 255];
    let base = [10u8, 10, 10, 255, 0, 0, 0, 0];
    for opacity in [0.0, 0.2, 0.5, 1.0, f32::NAN] {
        let mut dst = base;
        over_in_place(&mut dst, &src, opacity).unwrap();
        assert_eq!(&dst[..4], &over([10, 10, 10, 255], [40, 80, 120, 160], opacity));
        assert_eq!(&dst[4..], &over([0, 0, 0, 0], [255, 0, 0, 255], opacity));
    }
}

#[test]
fn scaled_draw_at_zero_opacity_leaves_destination() {
    let src_res = Resolution::new(1, 1).unwrap();
    let dst_res = Resolution::new(2, 2).unwrap();
    let mut dst = vec![7u8; dst_res.rgba8_len()];
    over_scaled_in_place(&mut dst, dst_res, &[255, 255, 255, 255], src_res, 0.0).unwrap();
    assert!(dst.iter().all(|&b| b == 7));
}

#[test]
fn scaled_draw_covers_whole_destination() {
    let src_res = Resolution::new(1, 1).unwrap();
    let dst_res = Resolution::new(3, 2).unwrap();
    let src = [10u8, 20, 30, 255];
    let mut dst = vec![0u8; dst_res.rgba8_len()];
    over_scaled_in_place(&mut dst, dst_res, &src, src_res, 1.0).unwrap();
    assert!(dst.chunks_exact(4).all(|px| px == src));
}

#[test]
fn resample_nearest_picks_source_quadrants() {
    let src_res = Resolution::new(2, 1).unwrap();
    let dst_res = Resolution::new(4, 1).unwrap();
    let src = [1u8, 1, 1, 255, 2, 2, 2, 255];
    let mut dst = vec![0u8; dst_res.rgba8_len()];
    resample_nearest(&mut dst, dst_res, &src, src_res);
    let reds: Vec<u8> = dst.chunks_exact(4).map(|px| px[0]).collect();
    assert_eq!(reds, vec![1, 1, 2, 2]);
}
