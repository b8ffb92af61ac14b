#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{json, Value};

pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// A Datumaro item with polygon annotations given as `(label_id, points)`.
pub fn item(id: &str, height: u32, width: u32, annotations: &[(i64, &[f64])]) -> Value {
    let annotations: Vec<Value> = annotations
        .iter()
        .enumerate()
        .map(|(index, (label_id, points))| {
            json!({
                "id": index,
                "type": "polygon",
                "attributes": {},
                "group": 0,
                "label_id": label_id,
                "points": points,
                "z_order": 0
            })
        })
        .collect();

    json!({
        "id": id,
        "annotations": annotations,
        "attr": { "frame": 0 },
        "image": { "path": format!("{id}.bmp"), "size": [height, width] }
    })
}

pub fn document(items: Vec<Value>, classes: &[&str]) -> Value {
    let labels: Vec<Value> = classes
        .iter()
        .map(|name| json!({ "name": name, "parent": "", "attributes": [] }))
        .collect();

    json!({
        "info": {},
        "categories": {
            "label": { "labels": labels, "attributes": [] },
            "points": { "items": [] }
        },
        "items": items
    })
}

pub fn write_document(root: &Path, split: &str, doc: &Value) {
    let path = root.join("annotations").join(format!("{split}.json"));
    fs::create_dir_all(path.parent().expect("annotations dir")).expect("create annotations dir");
    fs::write(path, serde_json::to_vec_pretty(doc).expect("encode doc")).expect("write doc");
}

/// Write a three-split dataset whose only content is `train_items` in the
/// train split. Test and val documents are empty; all image folders exist.
pub fn write_train_only_dataset(root: &Path, train_items: Vec<Value>, classes: &[&str]) {
    write_document(root, "test", &document(vec![], &[]));
    write_document(root, "train", &document(train_items, classes));
    write_document(root, "val", &document(vec![], &[]));
    for split in ["test", "train", "val"] {
        fs::create_dir_all(root.join("images").join(split)).expect("create images dir");
    }
}
