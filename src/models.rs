/// 引导页总数
pub const PAGE_COUNT: usize = 7;

/// 引导页
///
/// 首页和末页携带构造时注入的主操作（A），其余页面没有参数。
#[derive(Debug, Clone, PartialEq)]
pub enum Page<A> {
    Welcome(A),
    Sensors,
    Experiments,
    Observations,
    Recording,
    Sync,
    Finish(A),
}

impl<A> Page<A> {
    /// 页面的主操作（只有首末两页有）
    pub fn primary_action(&self) -> Option<&A> {
        match self {
            Page::Welcome(action) | Page::Finish(action) => Some(action),
            _ => None,
        }
    }

    pub fn primary_label(&self) -> Option<&'static str> {
        match self {
            Page::Welcome(_) => Some("跳过引导"),
            Page::Finish(_) => Some("开始使用"),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Welcome(_) => "欢迎使用科学日志",
            Page::Sensors => "认识传感器",
            Page::Experiments => "创建实验",
            Page::Observations => "记录观察",
            Page::Recording => "采集数据",
            Page::Sync => "同步与分享",
            Page::Finish(_) => "准备就绪",
        }
    }

    pub fn body(&self) -> &'static [&'static str] {
        match self {
            Page::Welcome(_) => &[
                "科学日志把你的手机和外接传感器变成一间随身实验室。",
                "",
                "接下来的几页会带你了解：",
                "  • 如何连接和选择传感器",
                "  • 如何组织实验",
                "  • 如何记录笔记、照片和数据",
                "  • 如何同步和分享你的成果",
                "",
                "点击屏幕右侧或按 → 继续，点击左侧或按 ← 返回。",
            ],
            Page::Sensors => &[
                "每个实验都可以使用多个传感器。",
                "",
                "内置传感器包括光照、声音、加速度和磁场。",
                "通过蓝牙还可以连接外部传感器板，",
                "例如温度、电流和气压传感器。",
                "",
                "在传感器卡片上切换数据源，",
                "实时图表会立即更新。",
            ],
            Page::Experiments => &[
                "实验是一切记录的容器。",
                "",
                "为实验起一个有意义的名字，",
                "并添加一张封面图片方便查找。",
                "",
                "实验中的笔记、录制和照片",
                "会按时间顺序排列在时间线上。",
                "",
                "你可以随时归档不再需要的实验。",
            ],
            Page::Observations => &[
                "好的观察和数据一样重要。",
                "",
                "随时添加文字笔记，记录你的假设和发现。",
                "拍照可以保留实验装置的样子，",
                "快照可以捕捉某一时刻的传感器读数。",
                "",
                "笔记可以附加到某次录制的特定时间点上。",
            ],
            Page::Recording => &[
                "按下录制按钮开始采集数据。",
                "",
                "录制期间所有已打开的传感器都会同时记录。",
                "停止后可以回放录制，",
                "裁剪不需要的片段，",
                "并查看最小值、最大值和平均值。",
                "",
                "触发器可以在满足条件时自动开始或停止录制。",
            ],
            Page::Sync => &[
                "登录账户后，实验会同步到云端硬盘。",
                "",
                "在多台设备上继续同一个实验，",
                "或者把实验导出为文件发送给同学和老师。",
                "",
                "录制的数据也可以导出为 CSV，",
                "在表格软件中进一步分析。",
            ],
            Page::Finish(_) => &[
                "一切准备就绪！",
                "",
                "从创建第一个实验开始吧。",
                "",
                "你可以随时在设置中重新查看本引导。",
            ],
        }
    }
}
