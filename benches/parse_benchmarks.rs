use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jsource_core::{analyze, lexer::Lexer, parse_str, ClassNode};

// ============================================================================
// Test Data
// ============================================================================

const TINY_CLASS: &str = "class A { int x; }";

const SMALL_CLASS: &str = r#"package demo;

import java.util.List;

public class Names {
    private final List<String> names = new java.util.ArrayList<>();

    public void add(String name) {
        names.add(name);
    }
}"#;

const MEDIUM_CLASS: &str = r#"// Request handling
package com.acme.http;

import java.io.IOException;
import java.util.Map;
import javax.annotation.Nullable;

/**
 * Routes requests to handlers.
 *
 * @author http team
 */
@SuppressWarnings("unchecked")
public final class Router<H extends Handler> extends BaseRouter implements AutoCloseable {
    private static final int MAX_ROUTES = 256;

    // routing table
    private final Map<String, H> routes = new java.util.HashMap<>();

    @Nullable
    private H fallback;

    static {
        Registry.install();
    }

    public Router(@Nullable H fallback) {
        this.fallback = fallback;
    }

    /**
     * Dispatches one request.
     *
     * @param path the request path
     * @return the response body
     * @throws IOException if the handler fails
     */
    public String dispatch(final String path) throws IOException {
        H handler = routes.getOrDefault(path, fallback);
        if (handler == null) {
            return "404";
        }
        return handler.handle(path);
    }

    @Override
    public void close() {
        routes.clear();
    }
}"#;

fn generate_class(members: usize) -> String {
    let mut source = String::from("public class Generated {\n");
    for i in 0..members {
        source.push_str(&format!(
            "    private int field{i} = {i};\n\n    public int get{i}() {{\n        return field{i};\n    }}\n\n"
        ));
    }
    source.push('}');
    source
}

// ============================================================================
// Lexer Benchmarks
// ============================================================================

fn bench_lexer_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_by_size");
    for (name, source) in [
        ("tiny", TINY_CLASS),
        ("small", SMALL_CLASS),
        ("medium", MEDIUM_CLASS),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let mut lexer = Lexer::new(black_box(src));
                lexer.lex()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Parser Benchmarks
// ============================================================================

fn bench_parser_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_by_size");
    for (name, source) in [
        ("tiny", TINY_CLASS),
        ("small", SMALL_CLASS),
        ("medium", MEDIUM_CLASS),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| parse_str::<ClassNode>(black_box(src)))
        });
    }
    group.finish();
}

fn bench_parser_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_member_scaling");
    for size in [10, 50, 100, 500] {
        let source = generate_class(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, src| {
            b.iter(|| parse_str::<ClassNode>(black_box(src)))
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let class = parse_str::<ClassNode>(MEDIUM_CLASS).unwrap();
    c.bench_function("render_medium", |b| b.iter(|| black_box(&class).to_string()));
}

// ============================================================================
// End-to-End Analysis Benchmarks
// ============================================================================

fn bench_e2e_with_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("e2e_with_json_serialization");
    for (name, source) in [
        ("tiny", TINY_CLASS),
        ("small", SMALL_CLASS),
        ("medium", MEDIUM_CLASS),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, src| {
            b.iter(|| {
                let result = analyze(black_box(src), "Benchmark.java").unwrap();
                result.to_json()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_sizes,
    bench_parser_sizes,
    bench_parser_scaling,
    bench_render,
    bench_e2e_with_serialization,
);
criterion_main!(benches);
