use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kv_hostlink::{
    DataFormat, DeviceAddress, ReadBatchCommand, ReadCommand, Response, WriteBatchCommand,
};

fn bench_address_parse(c: &mut Criterion) {
    c.bench_function("parse DM100", |b| {
        b.iter(|| black_box("DM100").parse::<DeviceAddress>())
    });
    c.bench_function("parse W1FF", |b| {
        b.iter(|| black_box("W1FF").parse::<DeviceAddress>())
    });
}

fn bench_encode(c: &mut Criterion) {
    let dm: DeviceAddress = "DM100".parse().unwrap();

    c.bench_function("encode RD", |b| {
        b.iter(|| ReadCommand::new(black_box(dm), DataFormat::S16).to_bytes())
    });

    c.bench_function("encode RDS 100", |b| {
        b.iter(|| {
            ReadBatchCommand::new(black_box(dm), DataFormat::U16, 100)
                .unwrap()
                .to_bytes()
        })
    });

    let values: Vec<String> = (0..100).map(|v| v.to_string()).collect();
    c.bench_function("encode WRS 100", |b| {
        b.iter(|| {
            WriteBatchCommand::new(black_box(dm), DataFormat::U16, 100, &values[..])
                .unwrap()
                .to_bytes()
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let scalar = b"00042\r\n".to_vec();
    c.bench_function("decode scalar", |b| {
        b.iter(|| Response::from_bytes(black_box(&scalar)).unwrap().into_text())
    });

    let mut batch = (0..100)
        .map(|v| format!("{:05}", v))
        .collect::<Vec<_>>()
        .join(" ")
        .into_bytes();
    batch.extend_from_slice(b"\r\n");
    c.bench_function("decode 100 tokens", |b| {
        b.iter(|| Response::from_bytes(black_box(&batch)).unwrap().tokens())
    });
}

criterion_group!(benches, bench_address_parse, bench_encode, bench_decode);
criterion_main!(benches);
