use digitgan::{GanConfig, GanTrainer};
use digitgan_core::DigitGanError;
use digitgan_data::datasets::{load_mnist, MnistSplit};
use digitgan_data::{DataLoader, Dataset, ImageBatch, RandomSampler};
use env_logger::{Builder, Env, Target};
use log::info;

const DATASET_DIR: &str = "dataset/MNIST/raw";

fn main() -> Result<(), DigitGanError> {
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    let config = GanConfig::default();

    let dataset = load_mnist(DATASET_DIR, MnistSplit::Train)?;
    info!(
        "Loaded {} training images of {} pixels from {}",
        dataset.len(),
        dataset.image_dim(),
        DATASET_DIR
    );
    let loader = DataLoader::new(
        dataset,
        config.batch_size,
        RandomSampler::new(config.seed),
        false,
        Box::new(ImageBatch::collate),
    )?;

    let mut trainer = GanTrainer::new(config)?;
    let history = trainer.fit(&loader)?;
    if let Some(last) = history.epochs.last() {
        info!(
            "Finished {} epochs, last epoch mean losses: D {} G {}",
            history.epochs.len(),
            last.mean_loss_d,
            last.mean_loss_g
        );
    }

    let count = trainer.config().batch_size;
    let samples = trainer.sample(count)?;
    let values = samples.get_f32_data();
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    info!(
        "Generated {} samples of shape {:?}, mean pixel {}",
        count,
        samples.shape(),
        mean
    );
    Ok(())
}
