//! One-shot field generation: terrain, then anchors, then connector chains.
//!
//! The generator never touches the host scene. It returns a [`SceneDelta`]
//! that the host applies through [`SceneHost`].

use engine_core::{HeightSampler, MushroomKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::attributes::AttributeSynthesizer;
use crate::config::FieldConfig;
use crate::connector::{connect_anchors, Chain};
use crate::error::Result;
use crate::instance::MushroomInstance;
use crate::noise_field::{NoiseBank, NoiseOffsets, NoiseSource};
use crate::placement::{place_anchors, SkippedPlacement};
use crate::terrain::HeightGrid;

/// Host-side collaborator that receives a generated field.
pub trait SceneHost {
    type Handle;

    /// Commit the terrain heights (0-1) to the rendered terrain.
    fn set_height_field(&mut self, grid: &HeightGrid);

    /// Create a renderable object for `instance`; the host owns it afterwards.
    fn instantiate(&mut self, kind: MushroomKind, instance: &MushroomInstance) -> Self::Handle;
}

/// Anchors and chains produced by [`FieldGenerator::populate`].
#[derive(Debug, Clone, Default)]
pub struct Population {
    pub anchors: Vec<MushroomInstance>,
    pub chains: Vec<Chain>,
    pub skipped: Vec<SkippedPlacement>,
}

/// Everything one generation pass produced.
#[derive(Debug, Clone)]
pub struct SceneDelta {
    pub heights: HeightGrid,
    pub anchors: Vec<MushroomInstance>,
    pub chains: Vec<Chain>,
    /// Instances dropped because no terrain was found under them.
    pub skipped: Vec<SkippedPlacement>,
}

impl SceneDelta {
    pub fn new(heights: HeightGrid, population: Population) -> Self {
        Self {
            heights,
            anchors: population.anchors,
            chains: population.chains,
            skipped: population.skipped,
        }
    }

    pub fn offspring_count(&self) -> usize {
        self.chains.iter().map(|c| c.links.len()).sum()
    }

    pub fn instance_count(&self) -> usize {
        self.anchors.len() + self.offspring_count()
    }

    /// All instances in creation order: anchors first, then each chain's offspring.
    pub fn instances(&self) -> impl Iterator<Item = (MushroomKind, &MushroomInstance)> + '_ {
        let anchors = self.anchors.iter().map(|a| (MushroomKind::Anchor, a));
        let offspring = self
            .chains
            .iter()
            .flat_map(|c| c.links.iter())
            .map(|l| (MushroomKind::Offspring, &l.instance));
        anchors.chain(offspring)
    }

    /// Commit the terrain, then instantiate every object in creation order.
    pub fn apply<H: SceneHost>(&self, host: &mut H) -> Vec<H::Handle> {
        host.set_height_field(&self.heights);
        self.instances()
            .map(|(kind, instance)| host.instantiate(kind, instance))
            .collect()
    }
}

/// Runs the generation phases for one configuration.
///
/// Phases are strictly ordered: [`terrain`](Self::terrain) may be called any
/// time, [`populate`](Self::populate) consumes the generator so anchors and
/// chains are produced exactly once.
pub struct FieldGenerator<'a, N: NoiseSource + ?Sized> {
    config: &'a FieldConfig,
    synth: AttributeSynthesizer<'a, N>,
    rng: StdRng,
}

impl<'a, N: NoiseSource + ?Sized> FieldGenerator<'a, N> {
    /// Validate `config`, seed the RNG and draw the run's noise offsets.
    pub fn new(config: &'a FieldConfig, noise: &'a N) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let offsets = NoiseOffsets::draw(&mut rng);
        Ok(Self::build(config, noise, offsets, rng))
    }

    /// Like [`new`](Self::new) but with caller-chosen noise offsets; the RNG
    /// is seeded from `config.seed` and only drives positions and spacing.
    pub fn with_offsets(config: &'a FieldConfig, noise: &'a N, offsets: NoiseOffsets) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self::build(config, noise, offsets, rng))
    }

    fn build(config: &'a FieldConfig, noise: &'a N, offsets: NoiseOffsets, rng: StdRng) -> Self {
        let bank = NoiseBank::new(noise, offsets, config.world_width, config.perlin_scale);
        let synth = AttributeSynthesizer::new(bank, config.ranges, config.color_mode);
        Self { config, synth, rng }
    }

    pub fn synthesizer(&self) -> &AttributeSynthesizer<'a, N> {
        &self.synth
    }

    pub fn offsets(&self) -> &NoiseOffsets {
        self.synth.bank().offsets()
    }

    /// Phase 1: the terrain height grid.
    pub fn terrain(&self) -> HeightGrid {
        HeightGrid::generate(self.config.resolution, self.config.world_width, &self.synth)
    }

    /// Phases 2 and 3: scatter anchors, then breed chains between neighbours.
    pub fn populate<H: HeightSampler + ?Sized>(mut self, heights: &H) -> Population {
        let config = self.config;
        let placed = place_anchors(
            config.anchor_count,
            config.world_width,
            &self.synth,
            heights,
            &mut self.rng,
        );
        let (chains, offspring_skipped) = connect_anchors(
            &placed.anchors,
            config.line_count,
            config.line_density,
            heights,
            &mut self.rng,
        );

        let mut skipped = placed.skipped;
        skipped.extend(offspring_skipped);
        Population {
            anchors: placed.anchors,
            chains,
            skipped,
        }
    }
}

/// Generate a whole field with a height backend that does not depend on the
/// generated terrain (flat ground, an external height source, ...).
pub fn generate<N, H>(config: &FieldConfig, noise: &N, heights: &H) -> Result<SceneDelta>
where
    N: NoiseSource + ?Sized,
    H: HeightSampler + ?Sized,
{
    let generator = FieldGenerator::new(config, noise)?;
    let grid = generator.terrain();
    let population = generator.populate(heights);
    Ok(SceneDelta::new(grid, population))
}
