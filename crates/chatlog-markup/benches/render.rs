//! Benchmarks for message rendering.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use chatlog_markup::{MentionKind, MentionNotFound, MentionResolver, Renderer};

struct StaticDirectory;

impl MentionResolver for StaticDirectory {
    fn resolve_user(&self, id: &str) -> Result<String, MentionNotFound> {
        Ok(format!("user-{id}"))
    }

    fn resolve_channel(&self, id: &str) -> Result<String, MentionNotFound> {
        if id.is_empty() {
            return Err(MentionNotFound::new(MentionKind::Channel, id));
        }
        Ok(format!("channel-{id}"))
    }
}

/// Generate a message with the given number of marked-up lines.
fn generate_message(lines: usize) -> String {
    let mut msg = String::with_capacity(lines * 120);
    for i in 0..lines {
        msg.push_str(&format!(
            "&gt; line {i} has *bold*, _italic_, ~strike~ and `code` for <@U{i}> in <#C{i}|chan>\n"
        ));
        msg.push_str("see <https://example.com/page|the page> or <!here> snake_case a<b\n");
    }
    msg.push_str("```\nfn main() { println!(\"<hi>\"); }\n```");
    msg
}

fn bench_render_plain(c: &mut Criterion) {
    let renderer = Renderer::default();

    c.bench_function("render_plain_text", |b| {
        b.iter(|| renderer.render("just a short plain message", &StaticDirectory));
    });
}

fn bench_render_varying_sizes(c: &mut Criterion) {
    let renderer = Renderer::default();
    let mut group = c.benchmark_group("render_by_size");

    for lines in [1, 10, 100] {
        let message = generate_message(lines);
        group.throughput(Throughput::Bytes(message.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("message", format!("{lines}_lines")),
            &message,
            |b, message| b.iter(|| renderer.render(message, &StaticDirectory)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render_plain, bench_render_varying_sizes);
criterion_main!(benches);
