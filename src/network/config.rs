use serde::{Serialize, Deserialize};

use crate::error::{MlpError, Result};
use crate::optim::UpdateRule;

/// Layer widths of the network. Fixed once the network is built.
///
/// Fields:
/// - `inputs` : length of every input vector (`I`)
/// - `hidden` : number of ReLU hidden units (`H`)
/// - `outputs`: number of sigmoid output units (`O`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Topology {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Topology {
        Topology { inputs, hidden, outputs }
    }
}

/// Where the parameter generator gets its seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
    /// Nanoseconds of the wall clock at construction. Two networks built
    /// within the clock's resolution may share a seed.
    #[default]
    Time,
    Fixed(u64),
}

/// Everything needed to build an [`Mlp`](crate::Mlp): topology plus
/// hyperparameters.
///
/// `epochs` is not read by the network itself; it is carried for whatever
/// training loop drives it (see [`TrainConfig::for_mlp`](crate::TrainConfig::for_mlp)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpConfig {
    pub topology: Topology,
    pub learning_rate: f64,
    pub epochs: usize,
    #[serde(default)]
    pub update_rule: UpdateRule,
    #[serde(default)]
    pub seed: Seed,
}

impl MlpConfig {
    /// Config with the reference update rule and a time-derived seed.
    pub fn new(topology: Topology, learning_rate: f64, epochs: usize) -> MlpConfig {
        MlpConfig {
            topology,
            learning_rate,
            epochs,
            update_rule: UpdateRule::default(),
            seed: Seed::default(),
        }
    }

    pub fn with_update_rule(mut self, rule: UpdateRule) -> MlpConfig {
        self.update_rule = rule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> MlpConfig {
        self.seed = Seed::Fixed(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let t = &self.topology;
        if t.inputs == 0 || t.hidden == 0 || t.outputs == 0 {
            return Err(MlpError::InvalidConfig(format!(
                "layer widths must be positive, got {}-{}-{}",
                t.inputs, t.hidden, t.outputs
            )));
        }
        // Zero is accepted: it freezes the parameters.
        if !(self.learning_rate.is_finite() && self.learning_rate >= 0.0) {
            return Err(MlpError::InvalidConfig(format!(
                "learning rate must be finite and >= 0, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(MlpError::InvalidConfig("epochs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<MlpConfig> {
        let config: MlpConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config previously written by `save_json`.
    pub fn load_json(path: &str) -> Result<MlpConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: MlpConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MlpConfig {
        MlpConfig::new(Topology::new(3, 5, 2), 0.01, 1000)
    }

    #[test]
    fn defaults_to_reference_rule_and_time_seed() {
        let c = config();
        assert_eq!(c.update_rule, UpdateRule::Reference);
        assert_eq!(c.seed, Seed::Time);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_zero_widths_and_bad_rates() {
        let mut c = config();
        c.topology.hidden = 0;
        assert!(matches!(c.validate(), Err(MlpError::InvalidConfig(_))));

        let mut c = config();
        c.learning_rate = f64::NAN;
        assert!(c.validate().is_err());
        c.learning_rate = -0.1;
        assert!(c.validate().is_err());
        c.learning_rate = 0.0;
        assert!(c.validate().is_ok());

        let mut c = config();
        c.epochs = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn parses_json_with_optional_fields() {
        let c = MlpConfig::from_json_str(
            r#"{"topology":{"inputs":2,"hidden":4,"outputs":1},"learning_rate":0.5,"epochs":10}"#,
        )
        .unwrap();
        assert_eq!(c.topology, Topology::new(2, 4, 1));
        assert_eq!(c.update_rule, UpdateRule::Reference);
        assert_eq!(c.seed, Seed::Time);

        let c = MlpConfig::from_json_str(
            r#"{"topology":{"inputs":2,"hidden":4,"outputs":1},"learning_rate":0.5,"epochs":10,
                "update_rule":"canonical","seed":{"fixed":9}}"#,
        )
        .unwrap();
        assert_eq!(c.update_rule, UpdateRule::Canonical);
        assert_eq!(c.seed, Seed::Fixed(9));
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        let err = MlpConfig::from_json_str(
            r#"{"topology":{"inputs":0,"hidden":4,"outputs":1},"learning_rate":0.5,"epochs":10}"#,
        );
        assert!(matches!(err, Err(MlpError::InvalidConfig(_))));
        assert!(matches!(MlpConfig::from_json_str("{"), Err(MlpError::Json(_))));
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("oxide-mlp-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let c = config().with_seed(42).with_update_rule(UpdateRule::Canonical);
        c.save_json(path).unwrap();
        let loaded = MlpConfig::load_json(path).unwrap();
        std::fs::remove_file(path).ok();
        assert_eq!(loaded, c);
    }
}
