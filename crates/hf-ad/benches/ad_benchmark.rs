use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hf_ad::tape::Tape;
use hf_ad::{Dual, ReverseTape, Scalar};
use std::hint::black_box;

/// f(k, x) = sum_i k_i ln(x_i) - x_i - lgamma(k_i + 1)
fn poisson_like<S: Scalar>(k: &[f64], x: &[S]) -> S {
    k.iter().zip(x).fold(S::from_f64(0.0), |acc, (&k, &x)| {
        let k = S::from_f64(k);
        acc + k * x.ln() - x - (k + S::from_f64(1.0)).lgamma()
    })
}

fn bench_tape_build_and_backward(c: &mut Criterion) {
    let mut group = c.benchmark_group("ad_tape");

    for n_bins in [4usize, 16, 64, 256, 1024] {
        let k: Vec<f64> = (0..n_bins).map(|i| (i % 7) as f64 + 0.5).collect();

        group.bench_with_input(BenchmarkId::new("explicit_tape", n_bins), &n_bins, |b, &n| {
            let mut t = Tape::with_capacity(n * 8);
            b.iter(|| {
                t.clear();
                let xs: Vec<_> = (0..n).map(|i| t.var(2.0 + (i as f64) * 1e-3)).collect();
                let one = t.constant(1.0);
                let mut acc = t.constant(0.0);
                for (&ki, &x) in k.iter().zip(&xs) {
                    let kc = t.constant(ki);
                    let lnx = t.ln(x);
                    let klnx = t.mul(kc, lnx);
                    let kp1 = t.add(kc, one);
                    let lg = t.lgamma(kp1);
                    let term = t.sub(klnx, x);
                    let term = t.sub(term, lg);
                    acc = t.add(acc, term);
                }
                t.backward(acc);
                black_box(t.adjoint(xs[0]));
            })
        });

        group.bench_with_input(BenchmarkId::new("reverse_scalar", n_bins), &n_bins, |b, &n| {
            let mut tape = ReverseTape::with_capacity(n * 8);
            b.iter(|| {
                tape.clear();
                let xs: Vec<_> = (0..n).map(|i| tape.var(2.0 + (i as f64) * 1e-3)).collect();
                let out = poisson_like(&k, &xs);
                tape.backward(out);
                black_box(tape.adjoint(xs[n / 2]));
            })
        });
    }

    group.finish();
}

fn bench_dual_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("ad_dual");

    for n_bins in [4usize, 16, 64, 256] {
        let k: Vec<f64> = (0..n_bins).map(|i| (i % 7) as f64 + 0.5).collect();
        let x0: Vec<f64> = (0..n_bins).map(|i| 2.0 + (i as f64) * 1e-3).collect();

        group.bench_with_input(BenchmarkId::new("forward_grad_n_evals", n_bins), &n_bins, |b, &n| {
            b.iter(|| {
                let mut grad = vec![0.0; n];
                for seed in 0..n {
                    let mut xs: Vec<Dual> = Dual::lift_slice(&x0);
                    xs[seed].dot = 1.0;
                    grad[seed] = poisson_like(&k, &xs).dot;
                }
                black_box(grad[0]);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tape_build_and_backward, bench_dual_ops);
criterion_main!(benches);
