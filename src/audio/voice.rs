use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

/// Playback cursor over one sample buffer.
#[derive(Clone, Debug)]
pub struct Voice {
    pub pos: f32,
    pub speed: f32, // frames advanced per output frame
    pub gain: f32,
    pub looping: bool,
    pub active: bool,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            pos: 0.0,
            speed: 1.0,
            gain: 1.0,
            looping: false,
            active: false,
        }
    }
}

impl Voice {
    pub fn set_pos(&mut self, frame: usize, length: usize) {
        self.pos = if length == 0 {
            0.0
        } else {
            frame.min(length - 1) as f32
        };
    }

    /// Mix this voice into `out`. Returns true if a one-shot ran off the end
    /// during this block; the voice is then inactive and rewound to 0.
    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) -> bool {
        if !self.active {
            return false;
        }
        let data = &buffer.data;
        let length = data.len();
        if length == 0 {
            self.finish();
            return true;
        }
        let end = length as f32;

        for frame in out.iter_mut() {
            // read sample at current position
            let i = (self.pos as usize).min(length - 1);
            let frac = self.pos - i as f32;
            let s0 = data[i];
            let s1 = match data.get(i + 1) {
                Some(s) => *s,
                None if self.looping => data[0],
                None => s0,
            };
            frame.add_scaled(StereoFrame::lerp(s0, s1, frac), self.gain);

            self.pos += self.speed;
            if self.pos >= end {
                if self.looping {
                    self.pos %= end;
                } else {
                    self.finish();
                    return true;
                }
            }
        }
        false
    }

    fn finish(&mut self) {
        self.active = false;
        self.pos = 0.0;
    }
}
