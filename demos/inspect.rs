// 导入必要的库和模块
use ozimap::{GeoReference, OziMap, OziOptions};
use std::env;
use std::time::Instant;

// 定义常量：默认的 .map 文件路径
const SAMPLE_MAP: &str = "data/sample.map";

fn main() {
    println!("Example: ozimap inspect");

    // 初始化日志记录器
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG) // 设置最大日志级别为 DEBUG
        .init();

    // 获取命令行参数，如果没有提供参数，则使用默认的SAMPLE_MAP
    let args: Vec<String> = env::args().chain(vec![SAMPLE_MAP.to_string()]).collect();
    let path = &args[1];

    println!("Opening `{path}`");
    let t0 = Instant::now();
    let map = OziMap::open(path, &OziOptions::default()).unwrap();
    println!(
        "Parsed in {:.3}ms",
        t0.elapsed().as_micros() as f64 / 1000.0
    );

    println!("Image: {:?}", map.image_path());
    match &map.georeference().reference {
        GeoReference::Affine(gt) => {
            println!("GeoTransform: {:?}", gt.0);
            println!("  origin: {:?}", gt.origin());
            println!("  pixel size: {:?}", gt.pixel_size());
        }
        GeoReference::Gcps(gcps) => {
            println!("{} GCPs (no affine fit):", gcps.len());
            for gcp in gcps {
                println!(
                    "  {:<8} ({:>8.1}, {:>8.1}) -> ({:.6}, {:.6})",
                    gcp.id, gcp.pixel, gcp.line, gcp.x, gcp.y
                );
            }
        }
    }
    println!("SRS: {}", map.spatial_ref().to_proj_string());
    println!("WKT: {}", map.projection_ref());
}
