//! Run-length planning for the read path.
//!
//! A requested slice over merged positions is turned into a sequence of
//! segments: fills for positions the owning child does not cover, and one
//! child-side read per maximal run of present positions whose child-local
//! indices keep a constant stride. Chunking is a pure performance measure;
//! the assembled output is identical to fetching one value per position.

use stitch_common::Slice;

/// One step of a planned read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Emit `count` fill values.
    Fill { count: usize },
    /// Read `slice` from the child's own axis and append the result.
    Fetch { slice: Slice },
}

/// Plan child reads for a requested slice over merged positions.
///
/// Walks the requested positions in order. Consecutive absent positions
/// coalesce into one `Fill`; present positions accumulate into a `Fetch`
/// run for as long as the child-local stride stays constant. The stride is
/// established by the first two present positions of a run; a run cut off
/// after one position fetches with stride 1.
///
/// The segment counts always sum to `request.count()`.
pub fn plan_segments(index_map: &[Option<usize>], request: Slice) -> Vec<Segment> {
    struct Run {
        start: usize,
        last: usize,
        stride: Option<usize>,
    }

    impl Run {
        fn to_segment(&self) -> Segment {
            Segment::Fetch {
                slice: Slice::new(self.start, self.stride.unwrap_or(1), self.last),
            }
        }
    }

    let mut segments: Vec<Segment> = Vec::new();
    let mut run: Option<Run> = None;

    for position in request.positions() {
        match index_map[position] {
            None => {
                if let Some(run) = run.take() {
                    segments.push(run.to_segment());
                }
                match segments.last_mut() {
                    Some(Segment::Fill { count }) => *count += 1,
                    _ => segments.push(Segment::Fill { count: 1 }),
                }
            }
            Some(index) => {
                run = Some(match run.take() {
                    None => Run {
                        start: index,
                        last: index,
                        stride: None,
                    },
                    Some(mut active) => {
                        // Child indices grow along the walk, so the step is
                        // always positive.
                        let step = index - active.last;
                        match active.stride {
                            None => {
                                active.stride = Some(step);
                                active.last = index;
                                active
                            }
                            Some(stride) if stride == step => {
                                active.last = index;
                                active
                            }
                            Some(_) => {
                                segments.push(active.to_segment());
                                Run {
                                    start: index,
                                    last: index,
                                    stride: None,
                                }
                            }
                        }
                    }
                });
            }
        }
    }

    if let Some(run) = run {
        segments.push(run.to_segment());
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(count: usize) -> Segment {
        Segment::Fill { count }
    }

    fn fetch(start: usize, stride: usize, stop: usize) -> Segment {
        Segment::Fetch {
            slice: Slice::new(start, stride, stop),
        }
    }

    fn planned_count(segments: &[Segment]) -> usize {
        segments
            .iter()
            .map(|seg| match seg {
                Segment::Fill { count } => *count,
                Segment::Fetch { slice } => slice.count(),
            })
            .sum()
    }

    #[test]
    fn test_contiguous_present_run() {
        let map = [Some(0), Some(1), Some(2), Some(3)];
        let segments = plan_segments(&map, Slice::new(0, 1, 3));
        assert_eq!(segments, vec![fetch(0, 1, 3)]);
    }

    #[test]
    fn test_fills_and_runs_interleaved() {
        // Index map of the child that owns positions 0..2 and 4
        let map = [Some(0), Some(1), Some(2), None, Some(3), None];
        let segments = plan_segments(&map, Slice::new(0, 1, 5));
        assert_eq!(
            segments,
            vec![fetch(0, 1, 2), fill(1), fetch(4, 1, 4), fill(1)]
        );
        assert_eq!(planned_count(&segments), 6);
    }

    #[test]
    fn test_strided_request_keeps_constant_child_stride() {
        // Positions 1, 3, 5 of a child present everywhere: child indices
        // 1, 3, 5 form a single stride-2 run
        let map = [Some(0), Some(1), Some(2), Some(3), Some(4), Some(5)];
        let segments = plan_segments(&map, Slice::new(1, 2, 5));
        assert_eq!(segments, vec![fetch(1, 2, 5)]);
    }

    #[test]
    fn test_stride_break_splits_run() {
        // Walking positions 1, 3, 5: child indices 0, 1, 3. The jump from
        // 1 to 3 breaks the stride-1 run established by 0, 1
        let map = [None, Some(0), None, Some(1), Some(2), Some(3)];
        let segments = plan_segments(&map, Slice::new(1, 2, 5));
        assert_eq!(segments, vec![fetch(0, 1, 1), fetch(3, 1, 3)]);
        assert_eq!(planned_count(&segments), 3);
    }

    #[test]
    fn test_all_absent() {
        let map = [None, None, None, None];
        let segments = plan_segments(&map, Slice::new(0, 1, 3));
        assert_eq!(segments, vec![fill(4)]);
    }

    #[test]
    fn test_single_present_position() {
        let map = [None, Some(7), None];
        let segments = plan_segments(&map, Slice::new(0, 1, 2));
        assert_eq!(segments, vec![fill(1), fetch(7, 1, 7), fill(1)]);
    }

    #[test]
    fn test_leading_and_trailing_fills_coalesce() {
        let map = [None, None, Some(0), None, None];
        let segments = plan_segments(&map, Slice::new(0, 1, 4));
        assert_eq!(segments, vec![fill(2), fetch(0, 1, 0), fill(2)]);
    }

    #[test]
    fn test_subrange_request() {
        let map = [Some(0), Some(1), Some(2), None, Some(3), None];
        let segments = plan_segments(&map, Slice::new(2, 1, 4));
        assert_eq!(segments, vec![fetch(2, 1, 2), fill(1), fetch(4, 1, 4)]);
    }

    #[test]
    fn test_wide_child_stride() {
        // Consecutive merged positions mapping to every third child index
        let map = [Some(0), Some(3), Some(6), Some(9)];
        let segments = plan_segments(&map, Slice::new(0, 1, 3));
        assert_eq!(segments, vec![fetch(0, 3, 9)]);
    }
}
