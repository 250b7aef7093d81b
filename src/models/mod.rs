mod video_info;

pub use video_info::VideoInfo;
