//! Detection assembler: validates the output set, filters candidates and
//! collects decoded records in candidate order.

use tracing::{debug, error, info};

use crate::decoder::box_decoder::{check_coordinate_scale, raw_box};
use crate::decoder::mask_decoder::{decode_mask, mask_resolution};
use crate::decoder::{
    ClassIndexViolation, DecodeOptions, Decoded, DetectionParams, DetectionRecord,
    InstanceMaskRecord, NetworkInfo, Rect,
};
use crate::error::{DecodeError, Result};
use crate::tensor::{BoundTensors, LayerSchema, OutputLayer, TensorRole};

/// Tracing target of the per-candidate diagnostic events.
pub const CANDIDATE_TARGET: &str = "yolo_nms_rs::candidates";

/// Decode an end-to-end NMS output set into detection records.
///
/// Accepts `num_dets`, `det_boxes`, `det_scores`, `det_classes` and, when five
/// layers are given, `det_indices`. A candidate whose class index is out of
/// range is reported in [`Decoded::class_violations`] and still decoded.
pub fn decode_detections(
    layers: &[OutputLayer<'_>],
    network: &NetworkInfo,
    params: &DetectionParams,
    options: &DecodeOptions,
) -> Result<Decoded<DetectionRecord>> {
    let tensors = LayerSchema::Detections.bind(layers)?;
    let threshold = params.threshold()?;
    let keep_count = tensors.keep_count()?;
    if keep_count > 0 {
        check_coordinate_scale(&tensors.boxes)?;
    }

    let (max_x, max_y) = network.clip_bounds();
    let mut decoded = Decoded::default();
    for index in kept_candidates(&tensors, keep_count, threshold) {
        let class_id = tensors.classes[index] as u32;
        if class_id >= params.num_classes_configured {
            decoded
                .class_violations
                .push(report_class_violation(index, class_id, params));
        }

        let confidence = tensors.scores[index];
        let raw = raw_box(&tensors.boxes, index);
        if options.debug {
            let opaque = tensors.indices.as_ref().map(|indices| indices[index]);
            trace_candidate(opaque, class_id, confidence, &raw);
        }

        decoded.objects.push(DetectionRecord {
            class_id,
            confidence,
            bbox: raw.clipped(max_x, max_y),
        });
    }

    debug!(
        "decoded {} of {} candidates ({} class violations)",
        decoded.objects.len(),
        keep_count,
        decoded.class_violations.len()
    );
    Ok(decoded)
}

/// Decode an end-to-end instance-segmentation output set.
///
/// Requires exactly `num_dets`, `det_boxes`, `det_scores`, `det_classes` and
/// `det_masks`. A candidate whose class index is out of range is reported in
/// [`Decoded::class_violations`] and skipped.
pub fn decode_instance_masks(
    layers: &[OutputLayer<'_>],
    network: &NetworkInfo,
    params: &DetectionParams,
    options: &DecodeOptions,
) -> Result<Decoded<InstanceMaskRecord>> {
    let tensors = LayerSchema::InstanceMasks.bind(layers)?;
    let masks = tensors
        .masks
        .clone()
        .ok_or_else(|| DecodeError::MissingTensors {
            roles: vec![TensorRole::Masks],
        })?;
    let resolution = mask_resolution(&masks)?;
    let threshold = params.threshold()?;
    let keep_count = tensors.keep_count()?;
    if options.debug {
        info!(target: CANDIDATE_TARGET, keep_count, "keep count");
    }
    if keep_count > 0 {
        check_coordinate_scale(&tensors.boxes)?;
    }

    let (max_x, max_y) = network.clip_bounds();
    let mut decoded = Decoded::default();
    for index in kept_candidates(&tensors, keep_count, threshold) {
        let class_id = tensors.classes[index] as u32;
        if class_id >= params.num_classes_configured {
            decoded
                .class_violations
                .push(report_class_violation(index, class_id, params));
            continue;
        }

        let confidence = tensors.scores[index];
        let raw = raw_box(&tensors.boxes, index);
        if options.debug {
            trace_candidate(None, class_id, confidence, &raw);
        }

        decoded.objects.push(InstanceMaskRecord {
            detection: DetectionRecord {
                class_id,
                confidence,
                bbox: raw.clipped(max_x, max_y),
            },
            mask: decode_mask(&masks, index, resolution),
        });
    }

    debug!(
        "decoded {} of {} candidates with {}x{} masks ({} skipped for class index)",
        decoded.objects.len(),
        keep_count,
        resolution,
        resolution,
        decoded.class_violations.len()
    );
    Ok(decoded)
}

/// Candidate rows below `keep_count` whose score reaches `threshold`, ascending.
fn kept_candidates<'t>(
    tensors: &'t BoundTensors<'_>,
    keep_count: usize,
    threshold: f32,
) -> impl Iterator<Item = usize> + 't {
    (0..keep_count).filter(move |&index| !below_threshold(tensors.scores[index], threshold))
}

// NaN scores are kept, like any score not strictly below the threshold.
#[inline]
fn below_threshold(score: f32, threshold: f32) -> bool {
    score < threshold
}

fn report_class_violation(
    candidate: usize,
    class_id: u32,
    params: &DetectionParams,
) -> ClassIndexViolation {
    let violation = ClassIndexViolation {
        candidate,
        class_id,
        num_classes: params.num_classes_configured,
    };
    error!(
        "The number of classes configured (num_detected_classes) is incorrect: {}",
        violation
    );
    violation
}

fn trace_candidate(opaque: Option<i32>, class_id: u32, confidence: f32, raw: &Rect) {
    let index = opaque.map_or_else(|| "None".to_string(), |value| value.to_string());
    info!(
        target: CANDIDATE_TARGET,
        index = %index,
        class_id,
        confidence,
        left = raw.left,
        top = raw.top,
        width = raw.width,
        height = raw.height,
        "idx/label/conf/ x/y w/h"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOXES: [f32; 12] = [
        0.0, 0.0, 10.0, 20.0, //
        5.0, 5.0, 15.0, 25.0, //
        -4.0, 30.0, 150.0, 60.0,
    ];
    const SCORES: [f32; 3] = [0.9, 0.1, 0.7];
    const CLASSES: [i32; 3] = [1, 2, 3];
    const MASKS: [f32; 12] = [
        0.1, 0.2, 0.3, 0.4, //
        0.5, 0.6, 0.7, 0.8, //
        0.9, 1.0, 0.0, 0.5,
    ];

    fn layers<'a>(num_dets: &'a [i32], classes: &'a [i32]) -> Vec<OutputLayer<'a>> {
        vec![
            OutputLayer::int32("num_dets", &[1], num_dets),
            OutputLayer::float32("det_boxes", &[3, 4], &BOXES),
            OutputLayer::float32("det_scores", &[3], &SCORES),
            OutputLayer::int32("det_classes", &[3], classes),
        ]
    }

    fn mask_layers<'a>(num_dets: &'a [i32], classes: &'a [i32]) -> Vec<OutputLayer<'a>> {
        let mut layers = layers(num_dets, classes);
        layers.push(OutputLayer::float32("det_masks", &[3, 4], &MASKS));
        layers
    }

    fn params() -> DetectionParams {
        DetectionParams::uniform(4, 0.5)
    }

    #[test]
    fn test_decode_detections_filters_low_scores() {
        let network = NetworkInfo::new(100, 100);
        let decoded = decode_detections(
            &layers(&[3], &CLASSES),
            &network,
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.objects[0].class_id, 1);
        assert_eq!(decoded.objects[0].bbox, Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(decoded.objects[1].class_id, 3);
        assert_eq!(decoded.objects[1].bbox, Rect::new(0.0, 30.0, 99.0, 30.0));
        assert!(decoded.class_violations.is_empty());
    }

    #[test]
    fn test_keep_count_bounds_iteration() {
        let network = NetworkInfo::new(100, 100);
        let decoded = decode_detections(
            &layers(&[1], &CLASSES),
            &network,
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.objects[0].confidence, 0.9);
    }

    #[test]
    fn test_zero_keep_count_skips_scale_check() {
        let normalized = [0.1f32; 12];
        let mut layers = layers(&[0], &CLASSES);
        layers[1] = OutputLayer::float32("det_boxes", &[3, 4], &normalized);
        let decoded = decode_detections(
            &layers,
            &NetworkInfo::default(),
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_normalized_boxes_fail() {
        let normalized = [0.1f32; 12];
        let mut layers = layers(&[2], &CLASSES);
        layers[1] = OutputLayer::float32("det_boxes", &[3, 4], &normalized);
        let err = decode_detections(
            &layers,
            &NetworkInfo::default(),
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::CoordinateScale { .. }));
    }

    #[test]
    fn test_box_pipeline_keeps_out_of_range_class() {
        let classes = [1, 2, 9];
        let decoded = decode_detections(
            &layers(&[3], &classes),
            &NetworkInfo::default(),
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.objects[1].class_id, 9);
        assert_eq!(
            decoded.class_violations,
            vec![ClassIndexViolation {
                candidate: 2,
                class_id: 9,
                num_classes: 4
            }]
        );
    }

    #[test]
    fn test_negative_class_is_out_of_range() {
        let classes = [-1, 2, 3];
        let decoded = decode_detections(
            &layers(&[1], &classes),
            &NetworkInfo::default(),
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(decoded.objects[0].class_id, u32::MAX);
        assert_eq!(decoded.class_violations.len(), 1);
    }

    #[test]
    fn test_empty_thresholds_fail() {
        let err = decode_detections(
            &layers(&[3], &CLASSES),
            &NetworkInfo::default(),
            &DetectionParams::uniform(4, 0.5).with_thresholds(Vec::new()),
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, DecodeError::EmptyThresholds);
    }

    #[test]
    fn test_debug_does_not_change_output() {
        let network = NetworkInfo::new(100, 100);
        let quiet = decode_detections(
            &layers(&[3], &CLASSES),
            &network,
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();
        let verbose = decode_detections(
            &layers(&[3], &CLASSES),
            &network,
            &params(),
            &DecodeOptions::default().with_debug(true),
        )
        .unwrap();
        assert_eq!(quiet, verbose);
    }

    #[test]
    fn test_decode_instance_masks() {
        let network = NetworkInfo::new(100, 100);
        let decoded = decode_instance_masks(
            &mask_layers(&[3], &CLASSES),
            &network,
            &params(),
            &DecodeOptions::default().with_debug(true),
        )
        .unwrap();

        assert_eq!(decoded.len(), 2);
        let first = &decoded.objects[0];
        assert_eq!(first.detection.class_id, 1);
        assert_eq!(first.mask.width(), 2);
        assert_eq!(first.mask.height(), 2);
        assert_eq!(first.mask.size_bytes(), 16);
        assert_eq!(first.mask.as_slice(), &MASKS[0..4]);
        assert_eq!(decoded.objects[1].mask.as_slice(), &MASKS[8..12]);
    }

    #[test]
    fn test_mask_pipeline_skips_out_of_range_class() {
        let classes = [7, 2, 3];
        let decoded = decode_instance_masks(
            &mask_layers(&[3], &classes),
            &NetworkInfo::default(),
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.objects[0].detection.class_id, 3);
        assert_eq!(decoded.class_violations[0].candidate, 0);
    }

    #[test]
    fn test_mask_pipeline_rejects_indices_set() {
        let indices = [0, 1, 2];
        let mut layers = layers(&[3], &CLASSES);
        layers.push(OutputLayer::int32("det_indices", &[3], &indices));
        let err = decode_instance_masks(
            &layers,
            &NetworkInfo::default(),
            &params(),
            &DecodeOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingTensors {
                roles: vec![TensorRole::Masks]
            }
        );
    }
}
