use bevy_math::Vec2;

/// Scale applied to the angular component of the polar gradient bands.
const ANGULAR_SCALE: f32 = 2.;

/// Signed angle from `from` to `to`. Zero when either vector has no length.
fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    if from.length_squared() <= f32::EPSILON || to.length_squared() <= f32::EPSILON {
        return 0.;
    }
    from.perp_dot(to).atan2(from.dot(to))
}

/// Blend weights of `points` for the query `input`, using gradient band
/// interpolation in polar space.
///
/// Each point gets the minimum influence over all the bands it forms with
/// the other points. Bands are measured in (radial, angular) coordinates so
/// that samples laid out around the origin blend by direction first. The
/// result has one weight per point and sums to one unless every weight is
/// zero.
pub fn polar_weights(points: &[Vec2], input: Vec2) -> Vec<f32> {
    let input_length = input.length();

    let mut weights: Vec<f32> = points
        .iter()
        .enumerate()
        .map(|(i, point_i)| {
            let length_i = point_i.length();
            let mut weight = 1.0_f32;

            for (j, point_j) in points.iter().enumerate() {
                if i == j {
                    continue;
                }

                let length_j = point_j.length();
                let mean_length = (length_i + length_j) / 2.;
                if mean_length <= f32::EPSILON {
                    continue;
                }

                let band = Vec2::new(
                    (length_j - length_i) / mean_length,
                    ANGULAR_SCALE * signed_angle(*point_i, *point_j),
                );
                let band_length_squared = band.length_squared();
                if band_length_squared <= f32::EPSILON {
                    continue;
                }

                let to_input = Vec2::new(
                    (input_length - length_i) / mean_length,
                    ANGULAR_SCALE * signed_angle(*point_i, input),
                );

                let influence = 1. - to_input.dot(band) / band_length_squared;
                weight = weight.min(influence);
            }

            weight.max(0.)
        })
        .collect();

    let total: f32 = weights.iter().sum();
    if total > 0. {
        for weight in &mut weights {
            *weight /= total;
        }
    }

    weights
}
