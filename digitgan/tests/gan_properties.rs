use digitgan::{Discriminator, GanConfig, GanTrainer, Generator};
use digitgan_core::nn::Module;
use digitgan_core::tensor::{rand_uniform, randn, zeros};
use digitgan_core::DigitGanError;
use digitgan_data::{DataLoader, ImageBatch, ImageDataset, SequentialSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generator_maps_noise_into_image_range() -> Result<(), DigitGanError> {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(21);
    let generator = Generator::new(&config, &mut rng)?;
    for batch in [1, 3, 32] {
        // Scaled noise drives the tanh into saturation
        let noise = rand_uniform(vec![batch, 32], -50.0, 50.0, &mut rng)?;
        let out = generator.forward(&noise)?;
        assert_eq!(out.shape(), vec![batch, 784]);
        assert!(out.get_f32_data().iter().all(|v| (-1.0..=1.0).contains(v)));
    }
    Ok(())
}

#[test]
fn test_discriminator_scores_in_open_unit_interval() -> Result<(), DigitGanError> {
    let config = GanConfig::default();
    let mut rng = StdRng::seed_from_u64(22);
    let discriminator = Discriminator::new(&config, &mut rng)?;
    for images in [
        zeros(vec![2, 784])?,
        randn(vec![4, 784], &mut rng)?,
        rand_uniform(vec![3, 784], -1.0, 1.0, &mut rng)?,
    ] {
        let rows = images.shape()[0];
        let out = discriminator.forward(&images)?;
        assert_eq!(out.shape(), vec![rows, 1]);
        assert!(out.get_f32_data().iter().all(|&p| p > 0.0 && p < 1.0));
    }
    Ok(())
}

#[test]
fn test_end_to_end_discriminator_learns_constant_data() -> Result<(), DigitGanError> {
    let config = GanConfig {
        batch_size: 4,
        seed: Some(2024),
        ..GanConfig::default()
    };
    let dataset = ImageDataset::new(vec![0.0; 4 * 784], vec![0; 4], 784)?;
    let loader = DataLoader::new(
        dataset,
        config.batch_size,
        SequentialSampler,
        false,
        Box::new(ImageBatch::collate),
    )?;

    let mut trainer = GanTrainer::new(config)?;
    let history = trainer.fit(&loader)?;
    assert_eq!(history.epochs.len(), 25);

    let first = history.epochs[0].first_batch.loss_d;
    let last = history.epochs[24].first_batch.loss_d;
    assert!(first.is_finite() && first > 0.0);
    assert!((first - std::f32::consts::LN_2).abs() < 0.15, "first lossD {}", first);
    assert!(last < first, "lossD went from {} to {}", first, last);
    assert!(last > 0.0);
    for record in &history.epochs {
        assert_eq!(record.batches, 1);
        assert!(record.first_batch.loss_g.is_finite());
    }
    Ok(())
}
