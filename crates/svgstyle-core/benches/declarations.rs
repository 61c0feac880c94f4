use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use svgstyle_core::{Options, PresentationAttributeSet, convert_style};

fn typical_style(repeat: usize) -> String {
    let mut s = String::new();
    for i in 0..repeat {
        s.push_str(&format!(
            "fill:#{i:06x};stroke-width:{}.00000012px;font-family:'Open Sans', sans-serif;\
             -inkscape-font-specification:'Open Sans';background:url(data:image/png;base64,iVBO{i}==);/* c */",
            i % 7
        ));
    }
    s
}

/// Inputs that make nested optional/lazy regex alternations blow up.
fn adversarial_styles(len: usize) -> Vec<(&'static str, String)> {
    vec![
        ("open_parens", format!("a:{}", "(".repeat(len))),
        ("unterminated_groups", format!("a:{}", "(x'".repeat(len / 3))),
        ("escapes", format!("a:{}", "\\".repeat(len))),
        ("no_colon", "x ".repeat(len / 2)),
        ("quote_newlines", format!("a:{}", "'\n".repeat(len / 2))),
        ("comment_like", format!("a:{}", "/ *".repeat(len / 3))),
    ]
}

fn bench_convert(c: &mut Criterion) {
    let set = PresentationAttributeSet::svg();
    let options = Options::default();

    let mut group = c.benchmark_group("convert_style");
    for repeat in [1usize, 16, 256] {
        let style = typical_style(repeat);
        group.bench_with_input(BenchmarkId::new("typical", repeat), &style, |b, style| {
            b.iter(|| convert_style(black_box(style), set, &options))
        });
    }
    for (name, style) in adversarial_styles(64 * 1024) {
        group.bench_with_input(BenchmarkId::new(name, style.len()), &style, |b, style| {
            b.iter(|| convert_style(black_box(style), set, &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
