use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdf_object_reader::{read_object, ByteCursor, ObjectReader};

fn page_tree(pages: usize) -> Vec<u8> {
    let mut out = b"<< /Type /Pages /Count ".to_vec();
    out.extend_from_slice(pages.to_string().as_bytes());
    out.extend_from_slice(b" /Kids [");
    for i in 0..pages {
        out.extend_from_slice(format!("{} 0 R ", i + 10).as_bytes());
    }
    out.extend_from_slice(b"] /MediaBox [0 0 612.0 792.0] /Title (Benchmark \\(tree\\)) >>");
    out
}

fn bench_dictionary(c: &mut Criterion) {
    let input = page_tree(1000);
    c.bench_function("page tree with 1000 references", |b| {
        b.iter(|| {
            let mut cursor = ByteCursor::from_bytes(black_box(&input));
            read_object(&mut cursor)
        })
    });
}

fn bench_numbers(c: &mut Criterion) {
    let input = (0..5000)
        .map(|i| format!("{} -{}.25", i, i))
        .collect::<Vec<_>>()
        .join(" ");
    let input = format!("[{}]", input);
    c.bench_function("array of 10000 numbers", |b| {
        b.iter(|| {
            let mut cursor = ByteCursor::from_bytes(black_box(input.as_bytes()));
            read_object(&mut cursor)
        })
    });
}

fn bench_indirect_stream(c: &mut Criterion) {
    let data = vec![b'x'; 64 * 1024];
    let mut input = format!("7 0 obj\n<< /Length {} >>\nstream\n", data.len()).into_bytes();
    input.extend_from_slice(&data);
    input.extend_from_slice(b"\nendstream\nendobj\n");
    let reader = ObjectReader::new();
    c.bench_function("indirect stream of 64 KiB", |b| {
        b.iter(|| {
            let mut cursor = ByteCursor::from_bytes(black_box(&input));
            reader.read_indirect_object(&mut cursor)
        })
    });
}

criterion_group!(benches, bench_dictionary, bench_numbers, bench_indirect_stream);
criterion_main!(benches);
