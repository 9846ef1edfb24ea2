//! Seedless 2D gradient noise.
//!
//! Output is remapped to `[0, 1]`, so an unperturbed lattice point (integer
//! input) always yields exactly `0.5`.

/// 2D Perlin noise in `[0, 1]`.
#[inline(always)]
pub fn perlin_2d(x: f32, y: f32) -> f32 {
  let xi = x.floor() as i32;
  let yi = y.floor() as i32;

  let xf = x - x.floor();
  let yf = y - y.floor();

  let u = fade(xf);
  let v = fade(yf);

  let aa = grad2d(hash2d(xi, yi), xf, yf);
  let ba = grad2d(hash2d(xi + 1, yi), xf - 1.0, yf);
  let ab = grad2d(hash2d(xi, yi + 1), xf, yf - 1.0);
  let bb = grad2d(hash2d(xi + 1, yi + 1), xf - 1.0, yf - 1.0);

  let n = lerp(lerp(aa, ba, u), lerp(ab, bb, u), v);
  (n * 0.5 + 0.5).clamp(0.0, 1.0)
}

#[inline(always)]
fn fade(t: f32) -> f32 {
  t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline(always)]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
  a + t * (b - a)
}

#[inline(always)]
fn hash2d(x: i32, y: i32) -> u32 {
  let mut h = 0x9E37_79B9u32;
  h ^= x as u32;
  h = h.wrapping_mul(0x85EB_CA6B);
  h ^= y as u32;
  h = h.wrapping_mul(0xC2B2_AE35);
  h ^= h >> 16;
  h
}

// Eight gradient directions: four axes and four diagonals.
#[inline(always)]
fn grad2d(hash: u32, x: f32, y: f32) -> f32 {
  match hash & 7 {
    0 => x,
    1 => -x,
    2 => y,
    3 => -y,
    4 => (x + y) * std::f32::consts::FRAC_1_SQRT_2,
    5 => (-x + y) * std::f32::consts::FRAC_1_SQRT_2,
    6 => (x - y) * std::f32::consts::FRAC_1_SQRT_2,
    _ => (-x - y) * std::f32::consts::FRAC_1_SQRT_2,
  }
}
