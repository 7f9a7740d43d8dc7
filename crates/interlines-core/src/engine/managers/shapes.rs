use super::{LineManager, unexpected};
use crate::core::interactions::kind::InteractionKind;
use crate::core::interactions::line::{Anchor, AnchorType, EntityIndex, Line, ShapeLine};
use crate::core::interactions::pair_key::PairKey;
use crate::core::interactions::structure::StructureRef;
use crate::core::models::complex::Complex;
use crate::core::settings::{InteractionSettings, LineSettings};
use crate::engine::cache::PairCache;
use crate::engine::error::LineError;
use crate::engine::host::{ShapeHost, expect_index_count};
use crate::engine::stream::{StreamUpdater, UpdateOutcome};
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Caches shape lines by structure pair and streams their colors to the host.
///
/// A pair holds at most one line per [`InteractionKind`]. Every structural change
/// (add, destroy, clear, or an upload that assigns new indices) destroys the
/// live stream, so the next update binds a fresh one to the current line set.
pub struct ShapesLineManager<H: ShapeHost> {
    cache: PairCache<ShapeLine>,
    updater: StreamUpdater<H::Stream>,
    host: PhantomData<fn(&H)>,
}

impl<H: ShapeHost> Default for ShapesLineManager<H> {
    fn default() -> Self {
        Self {
            cache: PairCache::new(),
            updater: StreamUpdater::new(),
            host: PhantomData,
        }
    }
}

impl<H: ShapeHost> ShapesLineManager<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `line` unless its pair already has a line of the same kind.
    pub fn add_shape_line(&mut self, line: ShapeLine) -> bool {
        let key = PairKey::from_line(&line);
        let entries = self.cache.get_or_insert_empty(key.clone());
        if entries.iter().any(|existing| existing.kind == line.kind) {
            debug!(pair = %key, kind = %line.kind, "Line already cached for pair, skipping.");
            return false;
        }
        entries.push(line);
        self.updater.invalidate();
        true
    }

    /// Lines cached for the pair, in either argument order.
    pub fn get_lines_for_structure_pair(&self, s1: &StructureRef, s2: &StructureRef) -> &[ShapeLine] {
        self.cache
            .get(&PairKey::from_structures(s1, s2))
            .unwrap_or_default()
    }

    /// All cached lines in ascending pair-key order.
    pub fn all_lines(&self) -> impl Iterator<Item = &ShapeLine> {
        self.cache.values()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn has_stream(&self) -> bool {
        self.updater.has_stream()
    }

    pub fn stream_indices(&self) -> Option<&[EntityIndex]> {
        self.updater.bound_indices()
    }

    /// Destroys the live stream, if any.
    pub fn invalidate_stream(&mut self) {
        self.updater.invalidate();
    }

    /// Uploads every cached line that has no host index yet.
    ///
    /// Returns how many lines were uploaded.
    pub async fn upload_pending(&mut self, host: &H) -> Result<usize, LineError> {
        let pending: Vec<ShapeLine> = self
            .cache
            .values()
            .filter(|line| line.index.is_none())
            .cloned()
            .collect();
        self.upload(host, &pending).await?;
        Ok(pending.len())
    }

    fn resolve_index(&self, line: &ShapeLine) -> ShapeLine {
        let mut resolved = line.clone();
        if resolved.index.is_none() {
            resolved.index = self
                .cache
                .get(&PairKey::from_line(line))
                .and_then(|entries| entries.iter().find(|stored| same_line(stored, line)))
                .and_then(|stored| stored.index);
        }
        resolved
    }

    /// Destroys every cached line on the host, then empties the cache.
    pub async fn clear(&mut self, host: &H) -> Result<(), LineError> {
        self.updater.invalidate();
        let lines: Vec<ShapeLine> = self.cache.values().cloned().collect();
        if !lines.is_empty() {
            host.destroy_lines(&lines).await?;
        }
        self.cache.clear();
        info!(count = lines.len(), "Cleared interaction lines.");
        Ok(())
    }
}

impl<H: ShapeHost> LineManager for ShapesLineManager<H> {
    type Host = H;
    type Entity = ShapeLine;

    /// The line is colored and shown per `settings`. Each end is anchored to its
    /// structure's anchor atom, offset onto the structure's centroid.
    fn draw_interaction_line(
        s1: &StructureRef,
        s2: &StructureRef,
        kind: InteractionKind,
        settings: &LineSettings,
    ) -> ShapeLine {
        let mut line = ShapeLine::new(kind, s1.endpoint(), s2.endpoint());
        line.visible = settings.visible;
        line.color = settings.color();
        line.anchors = [s1, s2].map(|structure| Anchor {
            anchor_type: AnchorType::Atom,
            target: structure.anchor_atom(),
            local_offset: structure.local_offset(),
        });
        line
    }

    fn add_line(&mut self, line: Line) -> Result<bool, LineError> {
        match line {
            Line::Shape(line) => Ok(self.add_shape_line(line)),
            other => Err(unexpected("ShapeLine", &other)),
        }
    }

    /// Host indices are written back into matching cached lines.
    async fn upload(&mut self, host: &H, lines: &[ShapeLine]) -> Result<Vec<EntityIndex>, LineError> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        let indices = expect_index_count(lines.len(), host.upload_lines(lines).await?)?;

        let mut reindexed = false;
        for (line, &index) in lines.iter().zip(&indices) {
            let key = PairKey::from_line(line);
            let stored = self
                .cache
                .get_mut(&key)
                .and_then(|entries| entries.iter_mut().find(|stored| same_line(stored, line)));
            if let Some(stored) = stored {
                if stored.index != Some(index) {
                    stored.index = Some(index);
                    reindexed = true;
                }
            }
        }
        if reindexed {
            self.updater.invalidate();
        }

        debug!(count = lines.len(), "Uploaded interaction lines.");
        Ok(indices)
    }

    /// Lines passed without a host index take the index of their cached copy,
    /// so the host is told which entities to drop. Missing lines are logged and
    /// skipped.
    async fn destroy_lines(&mut self, host: &H, lines: &[ShapeLine]) -> Result<(), LineError> {
        if lines.is_empty() {
            return Ok(());
        }
        self.updater.invalidate();
        let lines: Vec<ShapeLine> = lines.iter().map(|line| self.resolve_index(line)).collect();
        host.destroy_lines(&lines).await?;

        for line in &lines {
            let key = PairKey::from_line(line);
            if self
                .cache
                .remove_where(&key, |stored| same_line(stored, line))
                .is_none()
            {
                warn!(pair = %key, kind = %line.kind, "Line not found in manager while deleting.");
            }
        }
        Ok(())
    }

    async fn update_interaction_lines(
        &mut self,
        host: &H,
        settings: &InteractionSettings,
        complexes: &[&Complex],
    ) -> Result<UpdateOutcome, LineError> {
        self.updater
            .update(host, &mut self.cache, settings, complexes)
            .await
    }
}

/// Lines are compared within one pair's list. When both carry a host index it
/// decides; otherwise the kind does, since a pair holds one line per kind.
fn same_line(stored: &ShapeLine, line: &ShapeLine) -> bool {
    match (stored.index, line.index) {
        (Some(a), Some(b)) => a == b,
        _ => stored.kind == line.kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interactions::kind::InteractionKind::{Clash, HydrogenBond, Ionic};
    use crate::core::interactions::line::{Endpoint, InteractionLine};
    use crate::core::models::builder::ComplexBuilder;
    use crate::engine::stream::SkipReason;
    use crate::engine::testing::{HostCall, MockHost};
    use nalgebra::{Point3, Vector3};

    type Manager = ShapesLineManager<MockHost>;

    fn structure(indices: &[usize]) -> StructureRef {
        StructureRef::from_indices(indices, Some(0)).unwrap()
    }

    fn settings() -> InteractionSettings {
        [
            (HydrogenBond, LineSettings::new(true, [0, 0, 255])),
            (Clash, LineSettings::new(false, [255, 0, 0])),
            (Ionic, LineSettings::new(true, [0, 255, 0])),
        ]
        .into_iter()
        .collect()
    }

    fn draw(s1: &[usize], s2: &[usize], kind: InteractionKind) -> ShapeLine {
        let settings = settings();
        let line_settings = settings.get(kind).copied().unwrap();
        Manager::draw_interaction_line(&structure(s1), &structure(s2), kind, &line_settings)
    }

    /// Frame 0 shows atoms 1-6; frame 1 shows only atoms 1 and 2.
    fn scene() -> Complex {
        let mut builder = ComplexBuilder::new("scene");
        builder.index(1);
        for (frame, atoms) in [&[1, 2, 3, 4, 5, 6][..], &[1, 2][..]].into_iter().enumerate() {
            builder
                .start_molecule(&format!("frame {frame}"))
                .start_chain("A")
                .unwrap()
                .start_residue(1, "LIG")
                .unwrap();
            for &atom in atoms {
                builder.add_atom(atom, "C", Point3::origin()).unwrap();
            }
        }
        builder.build()
    }

    /// Keys: "1,2|5" (hbond), "1|6" (ionic), "3|4" (clash).
    async fn uploaded_manager(host: &MockHost) -> Manager {
        let mut manager = Manager::new();
        manager
            .add_lines([
                draw(&[3], &[4], Clash).into(),
                draw(&[1, 2], &[5], HydrogenBond).into(),
                draw(&[1], &[6], Ionic).into(),
            ])
            .unwrap();
        manager.upload_pending(host).await.unwrap();
        manager
    }

    fn alphas(values: &[u8]) -> Vec<u8> {
        values.chunks(4).map(|rgba| rgba[3]).collect()
    }

    #[test]
    fn swapped_structures_find_the_same_line() {
        let mut manager = Manager::new();
        let line = draw(&[1, 2], &[5], HydrogenBond);

        assert!(manager.add_line(line.clone().into()).unwrap());

        let s1 = structure(&[1, 2]);
        let s2 = structure(&[5]);
        assert_eq!(PairKey::from_line(&line).as_str(), "1,2|5");
        assert_eq!(manager.get_lines_for_structure_pair(&s1, &s2), &[line.clone()]);
        assert_eq!(manager.get_lines_for_structure_pair(&s2, &s1), &[line]);
    }

    #[test]
    fn duplicate_kind_for_a_pair_is_ignored() {
        let mut manager = Manager::new();
        assert!(manager.add_line(draw(&[1, 2], &[5], HydrogenBond).into()).unwrap());
        assert!(!manager.add_line(draw(&[5], &[2, 1], HydrogenBond).into()).unwrap());
        assert_eq!(manager.len(), 1);

        assert!(manager.add_line(draw(&[1, 2], &[5], Ionic).into()).unwrap());
        let kinds: Vec<InteractionKind> = manager
            .get_lines_for_structure_pair(&structure(&[1, 2]), &structure(&[5]))
            .iter()
            .map(|line| line.kind)
            .collect();
        assert_eq!(kinds, vec![HydrogenBond, Ionic]);
    }

    #[test]
    fn interaction_lines_are_rejected() {
        let mut manager = Manager::new();
        let line = InteractionLine::new(
            HydrogenBond,
            Endpoint::new(vec![1], None),
            Endpoint::new(vec![2], None),
        );
        let result = manager.add_line(line.into());
        assert!(matches!(
            result,
            Err(LineError::UnexpectedLine {
                expected: "ShapeLine",
                found: "InteractionLine"
            })
        ));
        assert!(manager.is_empty());
    }

    #[test]
    fn add_lines_continues_past_duplicates() {
        let mut manager = Manager::new();
        let added = manager
            .add_lines([
                draw(&[1], &[2], Clash).into(),
                draw(&[2], &[1], Clash).into(),
                draw(&[3], &[4], Clash).into(),
            ])
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn missing_pair_yields_no_lines() {
        let manager = Manager::new();
        assert!(
            manager
                .get_lines_for_structure_pair(&structure(&[1]), &structure(&[2]))
                .is_empty()
        );
    }

    #[test]
    fn draw_anchors_each_end_on_its_structure_centroid() {
        let ring = StructureRef::new(
            &[
                (7, Point3::new(0.0, 0.0, 0.0)),
                (8, Point3::new(2.0, 0.0, 0.0)),
                (9, Point3::new(1.0, 3.0, 0.0)),
            ],
            Some(2),
        )
        .unwrap();
        let ion = StructureRef::new(&[(20, Point3::new(5.0, 5.0, 5.0))], Some(0)).unwrap();
        let line_settings = LineSettings::new(false, [10, 20, 30]);

        let line = Manager::draw_interaction_line(&ring, &ion, Ionic, &line_settings);

        assert_eq!(line.kind, Ionic);
        assert!(!line.visible);
        assert_eq!(line.color.rgba(), [10, 20, 30, 255]);
        assert_eq!(line.atom1, Endpoint::new(vec![7, 8, 9], Some(2)));
        assert_eq!(line.atom2, Endpoint::new(vec![20], Some(0)));
        assert_eq!(line.anchors[0].anchor_type, AnchorType::Atom);
        assert_eq!(line.anchors[0].target, 7);
        assert!((line.anchors[0].local_offset - Vector3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        assert_eq!(line.anchors[1].target, 20);
        assert_eq!(line.anchors[1].local_offset, Vector3::zeros());
    }

    #[test]
    fn all_lines_iterates_in_ascending_pair_key_order() {
        let mut manager = Manager::new();
        manager
            .add_lines([
                draw(&[3], &[4], Clash).into(),
                draw(&[2], &[10], Clash).into(),
                draw(&[1], &[2], Clash).into(),
            ])
            .unwrap();

        let keys: Vec<String> = manager
            .all_lines()
            .map(|line| PairKey::from_line(line).to_string())
            .collect();
        assert_eq!(keys, vec!["10|2", "1|2", "3|4"]);
    }

    #[tokio::test]
    async fn upload_pending_writes_host_indices_back() {
        let host = MockHost::new();
        let manager = uploaded_manager(&host).await;

        let indices: Vec<Option<EntityIndex>> = manager.all_lines().map(|line| line.index).collect();
        assert_eq!(
            indices,
            vec![Some(EntityIndex(100)), Some(EntityIndex(101)), Some(EntityIndex(102))]
        );

        let mut manager = manager;
        assert_eq!(manager.upload_pending(&host).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn destroy_lines_issues_one_bulk_call_and_removes_the_line() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let target = manager.all_lines().next().cloned().unwrap();
        host.clear_calls();

        manager
            .destroy_lines(&host, std::slice::from_ref(&target))
            .await
            .unwrap();

        let destroys: Vec<HostCall> = host
            .calls()
            .into_iter()
            .filter(|call| matches!(call, HostCall::DestroyLines(_)))
            .collect();
        assert_eq!(destroys, vec![HostCall::DestroyLines(vec![target.clone()])]);
        assert!(manager.all_lines().all(|line| line != &target));
        assert_eq!(manager.len(), 2);
    }

    #[tokio::test]
    async fn destroying_unknown_lines_is_not_fatal() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let known = manager.all_lines().last().cloned().unwrap();
        let ghost = draw(&[40], &[41], Clash);

        manager.destroy_lines(&host, &[ghost, known]).await.unwrap();

        assert_eq!(manager.len(), 2);
    }

    #[tokio::test]
    async fn clear_destroys_everything_in_one_call() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let all: Vec<ShapeLine> = manager.all_lines().cloned().collect();
        host.clear_calls();

        manager.clear(&host).await.unwrap();

        assert_eq!(host.calls(), vec![HostCall::DestroyLines(all)]);
        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn update_applies_visibility_and_frame_alpha_rules() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let mut complex = scene();

        let outcome = manager
            .update_interaction_lines(&host, &settings(), &[&complex])
            .await
            .unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Streamed {
                lines: 3,
                in_frame: 3,
                out_of_frame: 0
            }
        );

        let updates = host.stream_updates();
        assert_eq!(updates.len(), 1);
        let (indices, values) = &updates[0];
        assert_eq!(indices, &vec![EntityIndex(100), EntityIndex(101), EntityIndex(102)]);
        assert_eq!(
            values,
            &vec![0, 0, 255, 255, 0, 255, 0, 255, 255, 0, 0, 0],
            "hbond and ionic shown, clash hidden by settings"
        );

        complex.set_current_frame(1).unwrap();
        let outcome = manager
            .update_interaction_lines(&host, &settings(), &[&complex])
            .await
            .unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Streamed {
                lines: 3,
                in_frame: 0,
                out_of_frame: 3
            }
        );
        assert_eq!(alphas(&host.stream_updates()[1].1), vec![0, 0, 0]);
        assert_eq!(host.created_streams().len(), 1, "stream is reused across passes");
    }

    #[tokio::test]
    async fn update_writes_colors_back_into_the_cache() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let complex = scene();

        manager
            .update_interaction_lines(&host, &settings(), &[&complex])
            .await
            .unwrap();

        let cached: Vec<([u8; 4], bool)> = manager
            .all_lines()
            .map(|line| (line.color.rgba(), line.visible))
            .collect();
        assert_eq!(
            cached,
            vec![
                ([0, 0, 255, 255], true),
                ([0, 255, 0, 255], true),
                ([255, 0, 0, 0], false),
            ]
        );
    }

    #[tokio::test]
    async fn mutation_forces_a_fresh_stream_for_the_new_line_set() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let complex = scene();
        let settings = settings();

        manager
            .update_interaction_lines(&host, &settings, &[&complex])
            .await
            .unwrap();
        assert!(manager.has_stream());

        manager.add_line(draw(&[2], &[4], Ionic).into()).unwrap();
        assert!(!manager.has_stream(), "adding destroys the stream immediately");
        assert_eq!(host.destroyed_streams(), 1);
        manager.upload_pending(&host).await.unwrap();

        manager
            .update_interaction_lines(&host, &settings, &[&complex])
            .await
            .unwrap();

        // "1,2|5" = 100, "1|6" = 101, "2|4" = 103, "3|4" = 102
        let expected = vec![
            EntityIndex(100),
            EntityIndex(101),
            EntityIndex(103),
            EntityIndex(102),
        ];
        assert_eq!(host.created_streams().last(), Some(&expected));
        assert_eq!(manager.stream_indices(), Some(&expected[..]));

        let removed = manager.all_lines().next().cloned().unwrap();
        manager
            .destroy_lines(&host, std::slice::from_ref(&removed))
            .await
            .unwrap();
        assert!(!manager.has_stream(), "removing destroys the stream immediately");
        manager
            .update_interaction_lines(&host, &settings, &[&complex])
            .await
            .unwrap();
        assert_eq!(host.created_streams().last(), Some(&expected[1..].to_vec()));
    }

    #[tokio::test]
    async fn empty_inputs_skip_without_touching_the_host() {
        let host = MockHost::new();
        let mut manager = Manager::new();
        let complex = scene();

        let outcome = manager
            .update_interaction_lines(&host, &settings(), &[&complex])
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::NoLines));

        let mut manager = uploaded_manager(&host).await;
        host.clear_calls();
        let outcome = manager
            .update_interaction_lines(&host, &settings(), &[])
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::NoComplexes));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn refused_stream_aborts_without_writing_state() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let before: Vec<ShapeLine> = manager.all_lines().cloned().collect();
        host.refuse_streams(true);

        let result = manager
            .update_interaction_lines(&host, &settings(), &[&scene()])
            .await;

        assert!(matches!(result, Err(LineError::StreamUnavailable)));
        assert!(host.stream_updates().is_empty());
        assert!(!manager.has_stream());
        assert_eq!(manager.all_lines().cloned().collect::<Vec<_>>(), before);
    }

    #[tokio::test]
    async fn failed_push_leaves_cached_colors_untouched() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let before: Vec<ShapeLine> = manager.all_lines().cloned().collect();
        host.fail_stream_updates(true);

        let result = manager
            .update_interaction_lines(&host, &settings(), &[&scene()])
            .await;

        assert!(matches!(result, Err(LineError::Host { .. })));
        assert_eq!(manager.all_lines().cloned().collect::<Vec<_>>(), before);
    }

    #[tokio::test]
    async fn missing_settings_abort_before_opening_a_stream() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let mut partial = InteractionSettings::new();
        partial.insert(HydrogenBond, LineSettings::new(true, [1, 2, 3]));

        let result = manager
            .update_interaction_lines(&host, &partial, &[&scene()])
            .await;

        assert!(matches!(result, Err(LineError::MissingSettings { kind: Ionic })));
        assert!(host.created_streams().is_empty());
    }

    #[tokio::test]
    async fn destroying_the_callers_copy_of_an_uploaded_line_removes_it() {
        let host = MockHost::new();
        let mut manager = Manager::new();
        let line = draw(&[1, 2], &[5], HydrogenBond);
        manager.add_line(line.clone().into()).unwrap();
        let indices = manager
            .upload(&host, std::slice::from_ref(&line))
            .await
            .unwrap();
        assert_eq!(line.index, None);

        manager
            .destroy_lines(&host, std::slice::from_ref(&line))
            .await
            .unwrap();

        assert!(manager.is_empty());
        let mut destroyed = line.clone();
        destroyed.index = Some(indices[0]);
        assert!(host.calls().contains(&HostCall::DestroyLines(vec![destroyed])));
    }

    #[tokio::test]
    async fn stale_index_does_not_match_a_reuploaded_line() {
        let host = MockHost::new();
        let mut manager = uploaded_manager(&host).await;
        let mut stale = manager.all_lines().next().cloned().unwrap();
        stale.index = Some(EntityIndex(9_999));

        manager
            .destroy_lines(&host, std::slice::from_ref(&stale))
            .await
            .unwrap();

        assert_eq!(manager.len(), 3);
    }
}
