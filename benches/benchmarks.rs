#[macro_use]
extern crate bencher;
extern crate sqmatmul;

use bencher::Bencher;
use sqmatmul::{multiply, multiply_with, MultiplyConfig};

// Compute GFlop/s
// by flop / s = 2 N³ / time

fn inputs(n: usize) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
    let a = (0..n * n).map(|i| (i % 13) as f32).collect();
    let b = (0..n * n).map(|i| (i % 7) as f32 - 3.).collect();
    (a, b, vec![0.; n * n])
}

macro_rules! mat_mul {
    ($modname:ident, $(($name:ident, $n:expr))+) => {
        mod $modname {
            use bencher::Bencher;
            use sqmatmul::multiply;
            $(
            pub fn $name(bench: &mut Bencher)
            {
                let (a, b, mut c) = super::inputs($n);
                bench.iter(|| multiply(&a, &b, &mut c, $n));
            }
            )+
        }
    };
}

mat_mul!{mat_mul_f32,
    (m004, 4)
    (m007, 7)
    (m008, 8)
    (m016, 16)
    (m032, 32)
    (m064, 64)
    (m127, 127)
    (m256, 256)
    (m512, 512)
}

fn lane_width_1(bench: &mut Bencher) {
    lane_width(bench, 1)
}

fn lane_width_4(bench: &mut Bencher) {
    lane_width(bench, 4)
}

fn lane_width_8(bench: &mut Bencher) {
    lane_width(bench, 8)
}

fn lane_width(bench: &mut Bencher, width: usize) {
    let n = 256;
    let (a, b, mut c) = inputs(n);
    let config = MultiplyConfig::new().with_lane_width(width);
    bench.iter(|| multiply_with(&config, &a, &b, &mut c, n));
}

fn single_worker_256(bench: &mut Bencher) {
    let n = 256;
    let (a, b, mut c) = inputs(n);
    let config = MultiplyConfig::new().with_workers(1);
    bench.iter(|| multiply_with(&config, &a, &b, &mut c, n));
}

fn default_256(bench: &mut Bencher) {
    let n = 256;
    let (a, b, mut c) = inputs(n);
    bench.iter(|| multiply(&a, &b, &mut c, n));
}

benchmark_group!(sizes,
    mat_mul_f32::m004,
    mat_mul_f32::m007,
    mat_mul_f32::m008,
    mat_mul_f32::m016,
    mat_mul_f32::m032,
    mat_mul_f32::m064,
    mat_mul_f32::m127,
    mat_mul_f32::m256,
    mat_mul_f32::m512
);
benchmark_group!(configs,
    lane_width_1,
    lane_width_4,
    lane_width_8,
    single_worker_256,
    default_256
);
benchmark_main!(sizes, configs);
