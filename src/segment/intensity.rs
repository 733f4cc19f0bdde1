use std::collections::VecDeque;
use std::f32::consts::PI;

use ndarray::Array2;
use rayon::prelude::*;

use crate::model::{LabelMask, NormalizedImage};

use super::{Result, SegmentError, SegmentParams, SegmentationBackend};

const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Classical intensity-based segmenter used when no learned model is
/// wired in: Gaussian smoothing, Otsu threshold, connected components,
/// then an area and compactness filter driven by the diameter and flow
/// threshold parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntensityBackend;

impl SegmentationBackend for IntensityBackend {
    fn name(&self) -> &'static str {
        "intensity"
    }

    fn segment(&self, image: &NormalizedImage, params: &SegmentParams) -> Result<LabelMask> {
        let plane = segmentation_plane(image, params.channels[0])?;
        let diameter = params.effective_diameter();
        let sigma = (diameter / 8.0).max(0.5);
        let blurred = gaussian_blur(&plane, sigma);

        let values = blurred.iter().copied().collect::<Vec<_>>();
        let (min, max) = min_max(&values);
        if max - min < 1e-6 {
            return Ok(LabelMask::new(Array2::zeros(image.dims())));
        }

        let threshold = otsu_threshold(&values);
        let binary = blurred.mapv(|value| value >= threshold);
        let (labels, label_count) = label_components(&binary);
        let filtered = filter_candidates(
            labels,
            label_count,
            minimum_area(diameter),
            compactness_floor(params.effective_flow_threshold()),
        );
        Ok(LabelMask::new(filtered))
    }
}

fn segmentation_plane(image: &NormalizedImage, channel: u8) -> Result<Array2<f32>> {
    match channel {
        0 => Ok(image.mean_channel().mapv(|value| value / 255.0)),
        1..=3 => Ok(image
            .channel(channel as usize - 1)
            .mapv(|value| value as f32 / 255.0)),
        other => Err(SegmentError::InvalidParams(format!(
            "channel index {other} out of range 0..=3"
        ))),
    }
}

fn gaussian_blur(plane: &Array2<f32>, sigma: f32) -> Array2<f32> {
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;
    let horizontal = blur_rows(plane, &kernel, radius);
    blur_rows(&horizontal.reversed_axes(), &kernel, radius).reversed_axes()
}

fn blur_rows(plane: &Array2<f32>, kernel: &[f32], radius: isize) -> Array2<f32> {
    let (height, width) = plane.dim();
    let rows = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0.0_f32; width];
            for (x, output) in row.iter_mut().enumerate() {
                let mut sum = 0.0_f32;
                for (kernel_index, weight) in kernel.iter().enumerate() {
                    let offset = kernel_index as isize - radius;
                    let clamped = (x as isize + offset).clamp(0, width as isize - 1) as usize;
                    sum += plane[[y, clamped]] * *weight;
                }
                *output = sum;
            }
            row
        })
        .collect::<Vec<_>>();

    let mut output = Array2::zeros((height, width));
    for (y, row) in rows.into_iter().enumerate() {
        for (x, value) in row.into_iter().enumerate() {
            output[[y, x]] = value;
        }
    }
    output
}

fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = (sigma * 3.0).ceil().max(1.0) as i32;
    let mut kernel = Vec::with_capacity((radius * 2 + 1) as usize);
    for offset in -radius..=radius {
        let distance = offset as f32;
        kernel.push((-(distance * distance) / (2.0 * sigma * sigma)).exp());
    }
    let sum: f32 = kernel.iter().sum();
    for value in &mut kernel {
        *value /= sum.max(f32::EPSILON);
    }
    kernel
}

pub(super) fn otsu_threshold(values: &[f32]) -> f32 {
    const BINS: usize = 256;
    let mut histogram = [0_u64; BINS];
    for value in values {
        let bin = (value.clamp(0.0, 1.0) * (BINS as f32 - 1.0)).round() as usize;
        histogram[bin] += 1;
    }

    let total = values.len() as f64;
    let mut overall_sum = 0.0_f64;
    for (index, count) in histogram.iter().enumerate() {
        overall_sum += index as f64 * *count as f64;
    }

    let mut background_weight = 0.0_f64;
    let mut background_sum = 0.0_f64;
    let mut best_split = 0_usize;
    let mut best_variance = f64::MIN;
    for (index, count) in histogram.iter().enumerate() {
        background_weight += *count as f64;
        background_sum += index as f64 * *count as f64;
        if background_weight == 0.0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0.0 {
            break;
        }
        let background_mean = background_sum / background_weight;
        let foreground_mean = (overall_sum - background_sum) / foreground_weight;
        let variance =
            background_weight * foreground_weight * (background_mean - foreground_mean).powi(2);
        if variance > best_variance {
            best_variance = variance;
            best_split = index;
        }
    }

    // the split bin itself stays in the background class
    (best_split as f32 + 1.0) / (BINS as f32 - 1.0)
}

pub(super) fn label_components(binary: &Array2<bool>) -> (Array2<u32>, u32) {
    let (height, width) = binary.dim();
    let mut labels = Array2::<u32>::zeros((height, width));
    let mut next_label = 1_u32;

    for y in 0..height {
        for x in 0..width {
            if !binary[[y, x]] || labels[[y, x]] != 0 {
                continue;
            }
            labels[[y, x]] = next_label;
            let mut queue = VecDeque::new();
            queue.push_back((y, x));

            while let Some((cy, cx)) = queue.pop_front() {
                for (dy, dx) in NEIGHBORS {
                    let ny = cy as isize + dy;
                    let nx = cx as isize + dx;
                    if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
                        continue;
                    }
                    let neighbor = (ny as usize, nx as usize);
                    if !binary[neighbor] || labels[neighbor] != 0 {
                        continue;
                    }
                    labels[neighbor] = next_label;
                    queue.push_back(neighbor);
                }
            }

            next_label += 1;
        }
    }

    (labels, next_label - 1)
}

#[derive(Debug, Clone, Copy, Default)]
struct Candidate {
    area: usize,
    perimeter: usize,
}

pub(super) fn filter_candidates(
    labels: Array2<u32>,
    label_count: u32,
    min_area: usize,
    compactness_floor: f32,
) -> Array2<u32> {
    let (height, width) = labels.dim();
    let mut candidates = vec![Candidate::default(); label_count as usize];
    for y in 0..height {
        for x in 0..width {
            let label = labels[[y, x]];
            if label == 0 {
                continue;
            }
            let candidate = &mut candidates[label as usize - 1];
            candidate.area += 1;
            candidate.perimeter += exposed_edges(&labels, y, x);
        }
    }

    let mut relabel = vec![0_u32; label_count as usize + 1];
    let mut kept = 0_u32;
    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.area >= min_area && compactness(candidate) >= compactness_floor {
            kept += 1;
            relabel[index + 1] = kept;
        }
    }

    labels.mapv(|label| relabel[label as usize])
}

fn exposed_edges(labels: &Array2<u32>, y: usize, x: usize) -> usize {
    let (height, width) = labels.dim();
    let label = labels[[y, x]];
    NEIGHBORS
        .into_iter()
        .filter(|&(dy, dx)| {
            let ny = y as isize + dy;
            let nx = x as isize + dx;
            if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
                return true;
            }
            labels[[ny as usize, nx as usize]] != label
        })
        .count()
}

/// 4 * pi * area / perimeter^2 with a taxicab perimeter. Compact blobs
/// land around 0.6 to 0.8; thin or ragged shapes fall well below.
fn compactness(candidate: &Candidate) -> f32 {
    if candidate.perimeter == 0 {
        return 0.0;
    }
    let area = candidate.area as f32;
    let perimeter = candidate.perimeter as f32;
    (4.0 * PI * area) / (perimeter * perimeter)
}

/// An order of magnitude below the expected cell area, floored at 9 px.
fn minimum_area(diameter: f32) -> usize {
    let expected = PI * (diameter / 2.0).powi(2);
    (expected / 10.0).max(9.0) as usize
}

/// Maps the flow threshold onto a compactness floor: 1.0 accepts every
/// candidate, 0.0 keeps only near-convex blobs.
fn compactness_floor(flow_threshold: f32) -> f32 {
    0.75 * (1.0 - flow_threshold.clamp(0.0, 1.0))
}

fn min_max(values: &[f32]) -> (f32, f32) {
    let mut iter = values.iter().copied();
    let first = iter.next().unwrap_or(0.0);
    let mut min = first;
    let mut max = first;
    for value in iter {
        min = min.min(value);
        max = max.max(value);
    }
    (min, max)
}
