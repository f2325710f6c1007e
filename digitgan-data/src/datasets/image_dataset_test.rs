use super::*;

fn tiny_dataset() -> ImageDataset {
    ImageDataset::new(vec![0.0, 0.1, 1.0, 1.1, 2.0, 2.1], vec![7, 8, 9], 2).expect("dataset")
}

#[test]
fn test_image_dataset_new_validates_sizes() {
    assert!(matches!(
        ImageDataset::new(vec![0.0; 5], vec![0, 1], 3),
        Err(DigitGanError::DatasetError(_))
    ));
    assert!(matches!(
        ImageDataset::new(Vec::new(), Vec::new(), 0),
        Err(DigitGanError::DatasetError(_))
    ));
    let empty = ImageDataset::new(Vec::new(), Vec::new(), 4).expect("empty dataset");
    assert!(empty.is_empty());
}

#[test]
fn test_image_dataset_get() {
    let ds = tiny_dataset();
    assert_eq!(ds.len(), 3);
    assert_eq!(ds.image_dim(), 2);
    let sample = ds.get(1).expect("in bounds");
    assert_eq!(sample.pixels, vec![1.0, 1.1]);
    assert_eq!(sample.label, 8);
}

#[test]
fn test_image_dataset_get_out_of_bounds() {
    let ds = tiny_dataset();
    assert!(matches!(
        ds.get(3),
        Err(DigitGanError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn test_collate_stacks_rows() -> Result<(), DigitGanError> {
    let ds = tiny_dataset();
    let batch = ImageBatch::collate(vec![ds.get(2)?, ds.get(0)?])?;
    assert_eq!(batch.images.shape(), vec![2, 2]);
    assert_eq!(batch.images.get_f32_data(), vec![2.0, 2.1, 0.0, 0.1]);
    assert_eq!(batch.labels, vec![9, 7]);
    assert_eq!(batch.batch_size(), 2);
    assert!(!batch.images.requires_grad());
    Ok(())
}

#[test]
fn test_collate_rejects_empty_and_ragged() {
    assert!(matches!(
        ImageBatch::collate(Vec::new()),
        Err(DigitGanError::DatasetError(_))
    ));
    let ragged = vec![
        ImageSample { pixels: vec![0.0, 1.0], label: 0 },
        ImageSample { pixels: vec![0.0], label: 1 },
    ];
    assert!(matches!(
        ImageBatch::collate(ragged),
        Err(DigitGanError::ShapeMismatch { .. })
    ));
}
