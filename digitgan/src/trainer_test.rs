use super::*;
use approx::assert_relative_eq;
use digitgan_core::tensor::rand_uniform;
use digitgan_data::{ImageDataset, SequentialSampler};
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

fn small_config(seed: u64) -> GanConfig {
    GanConfig {
        noise_dim: 4,
        image_dim: 6,
        generator_hidden: 5,
        discriminator_hidden: 3,
        num_epochs: 2,
        batch_size: 2,
        seed: Some(seed),
        ..GanConfig::default()
    }
}

fn snapshot(module: &dyn Module) -> Vec<Vec<f32>> {
    module.parameters().iter().map(|p| p.get_f32_data()).collect()
}

fn real_batch(seed: u64, rows: usize) -> Tensor {
    let mut rng = StdRng::seed_from_u64(seed);
    rand_uniform(vec![rows, 6], -1.0, 1.0, &mut rng).expect("real batch")
}

fn noise_batch(seed: u64, rows: usize) -> Tensor {
    let mut rng = StdRng::seed_from_u64(seed);
    randn(vec![rows, 4], &mut rng).expect("noise batch")
}

#[test]
fn test_new_rejects_invalid_config() {
    let config = GanConfig {
        noise_dim: 0,
        ..small_config(0)
    };
    assert!(matches!(
        GanTrainer::new(config),
        Err(DigitGanError::ConfigurationError(_))
    ));
}

#[test]
fn test_train_step_rejects_wrong_shapes() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(0))?;
    let wrong_width = Tensor::new(vec![0.0; 10], vec![2, 5])?;
    assert!(matches!(
        trainer.train_step(&wrong_width),
        Err(DigitGanError::ShapeMismatch { .. })
    ));
    let real = real_batch(1, 3);
    let wrong_noise = noise_batch(2, 2);
    assert!(matches!(
        trainer.train_step_with_noise(&real, &wrong_noise),
        Err(DigitGanError::ShapeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_one_step_updates_both_networks() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(3))?;
    let g_before = snapshot(trainer.generator());
    let d_before = snapshot(trainer.discriminator());

    let losses = trainer.train_step(&real_batch(4, 3))?;
    assert!(losses.loss_d.is_finite() && losses.loss_d > 0.0);
    assert!(losses.loss_g.is_finite() && losses.loss_g > 0.0);

    for (after, before) in snapshot(trainer.generator()).iter().zip(&g_before) {
        assert_ne!(after, before);
    }
    for (after, before) in snapshot(trainer.discriminator()).iter().zip(&d_before) {
        assert_ne!(after, before);
    }
    Ok(())
}

#[test]
fn test_discriminator_loss_formula() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(5))?;
    let real = real_batch(6, 4);
    let noise = noise_batch(7, 4);

    let p_real = trainer.discriminator().forward(&real)?.get_f32_data();
    let fake = trainer.generator().forward(&noise)?;
    let p_fake = trainer.discriminator().forward(&fake)?.get_f32_data();
    let mean_ln_real: f32 = p_real.iter().map(|p| p.ln()).sum::<f32>() / 4.0;
    let mean_ln_fake: f32 = p_fake.iter().map(|p| (1.0 - p).ln()).sum::<f32>() / 4.0;
    let expected = -(mean_ln_real + mean_ln_fake) / 2.0;

    let losses = trainer.train_step_with_noise(&real, &noise)?;
    assert_relative_eq!(losses.loss_d, expected, epsilon = 1e-5);
    Ok(())
}

#[test]
fn test_generator_loss_uses_updated_discriminator() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(8))?;
    let real = real_batch(9, 4);
    let noise = noise_batch(10, 4);
    let fake_before = trainer.generator().forward(&noise)?.detach();

    let losses = trainer.train_step_with_noise(&real, &noise)?;

    // Only the generator stepped after lossG, so the discriminator is D'
    let p = trainer.discriminator().forward(&fake_before)?.get_f32_data();
    let expected: f32 = p.iter().map(|p| -p.ln()).sum::<f32>() / 4.0;
    assert_relative_eq!(losses.loss_g, expected, epsilon = 1e-5);
    Ok(())
}

#[test]
fn test_same_seed_same_losses() -> Result<(), DigitGanError> {
    let mut a = GanTrainer::new(small_config(11))?;
    let mut b = GanTrainer::new(small_config(11))?;
    let real = real_batch(12, 2);
    for _ in 0..3 {
        assert_eq!(a.train_step(&real)?, b.train_step(&real)?);
    }
    Ok(())
}

#[test]
fn test_sample_is_detached_and_bounded() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(13))?;
    let samples = trainer.sample(7)?;
    assert_eq!(samples.shape(), vec![7, 6]);
    assert!(!samples.requires_grad());
    assert!(samples.grad_fn().is_none());
    assert!(samples.get_f32_data().iter().all(|v| (-1.0..=1.0).contains(v)));
    assert!(matches!(
        trainer.sample(0),
        Err(DigitGanError::ConfigurationError(_))
    ));
    Ok(())
}

#[test]
fn test_fit_records_every_epoch() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(14))?;
    let dataset = ImageDataset::new(vec![0.5; 5 * 6], vec![0; 5], 6)?;
    let loader = DataLoader::new(dataset, 2, SequentialSampler, false, Box::new(ImageBatch::collate))?;

    let history = trainer.fit(&loader)?;
    assert_eq!(history.epochs.len(), 2);
    for (i, record) in history.epochs.iter().enumerate() {
        assert_eq!(record.epoch, i);
        assert_eq!(record.batches, 3);
        assert!(record.first_batch.loss_d.is_finite());
        assert!(record.mean_loss_d > 0.0 && record.mean_loss_g > 0.0);
    }
    Ok(())
}

#[test]
fn test_fit_on_empty_loader_fails() -> Result<(), DigitGanError> {
    let mut trainer = GanTrainer::new(small_config(15))?;
    let dataset = ImageDataset::new(Vec::new(), Vec::new(), 6)?;
    let loader = DataLoader::new(dataset, 2, SequentialSampler, false, Box::new(ImageBatch::collate))?;
    assert!(matches!(
        trainer.fit(&loader),
        Err(DigitGanError::DatasetError(_))
    ));
    Ok(())
}

// --- Log capture ---

/// Records `info` lines together with the thread that emitted them, so
/// parallel tests only see their own output.
struct CaptureLogger {
    lines: Mutex<Vec<(ThreadId, String)>>,
}

static CAPTURE: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.lines
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((thread::current().id(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn install_capture() {
    // Another test may have installed it already
    let _ = log::set_logger(&CAPTURE);
    log::set_max_level(log::LevelFilter::Info);
}

fn captured_on_this_thread() -> Vec<String> {
    let me = thread::current().id();
    CAPTURE
        .lines
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .filter(|(id, _)| *id == me)
        .map(|(_, line)| line.clone())
        .collect()
}

#[test]
fn test_format_epoch_line_exact() {
    let losses = StepLosses {
        loss_d: 0.5,
        loss_g: 1.25,
    };
    assert_eq!(
        format_epoch_line(3, &losses),
        "Epoch: 3 \t Discriminator Loss: 0.5 Generator Loss: 1.25"
    );
}

#[test]
fn test_fit_logs_first_batch_of_each_epoch_only() -> Result<(), DigitGanError> {
    install_capture();
    let mut trainer = GanTrainer::new(small_config(16))?;
    let dataset = ImageDataset::new(vec![0.25; 6 * 6], vec![0; 6], 6)?;
    let loader = DataLoader::new(dataset, 2, SequentialSampler, false, Box::new(ImageBatch::collate))?;
    assert_eq!(loader.num_batches(), 3);

    let history = trainer.fit(&loader)?;
    let epoch_lines: Vec<String> = captured_on_this_thread()
        .into_iter()
        .filter(|line| line.starts_with("Epoch: "))
        .collect();

    let expected: Vec<String> = history
        .epochs
        .iter()
        .map(|record| format_epoch_line(record.epoch, &record.first_batch))
        .collect();
    assert_eq!(expected.len(), 2);
    assert_eq!(epoch_lines, expected);
    Ok(())
}
