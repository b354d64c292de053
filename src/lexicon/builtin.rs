//! Builtin lookup tables for beginner-level Mandarin lessons.
//!
//! Traditional and simplified forms are both listed because lesson content
//! and student transcripts mix the two. The first reading of an entry is
//! its primary pronunciation.

use super::FrequencyClass::{self, Common, Rare, Regular};

pub(super) const ENTRIES: &[(&str, &[&str], FrequencyClass)] = &[
    // Words
    ("你好", &["nǐ hǎo"], Common),
    ("學生", &["xué shēng"], Common),
    ("学生", &["xué shēng"], Common),
    ("謝謝", &["xiè xie"], Common),
    ("谢谢", &["xiè xie"], Common),
    ("對不起", &["duì bu qǐ"], Common),
    ("对不起", &["duì bu qǐ"], Common),
    ("再見", &["zài jiàn"], Common),
    ("再见", &["zài jiàn"], Common),
    ("老師", &["lǎo shī"], Common),
    ("老师", &["lǎo shī"], Common),
    ("中文", &["zhōng wén"], Common),
    ("中國", &["zhōng guó"], Common),
    ("中国", &["zhōng guó"], Common),
    ("中國人", &["zhōng guó rén"], Regular),
    ("中国人", &["zhōng guó rén"], Regular),
    ("朋友", &["péng you"], Common),
    ("喜歡", &["xǐ huan"], Common),
    ("喜欢", &["xǐ huan"], Common),
    ("今天", &["jīn tiān"], Common),
    ("明天", &["míng tiān"], Common),
    ("名字", &["míng zi"], Common),
    ("什麼", &["shén me"], Common),
    ("什么", &["shén me"], Common),
    ("我們", &["wǒ men"], Common),
    ("我们", &["wǒ men"], Common),
    ("你們", &["nǐ men"], Common),
    ("你们", &["nǐ men"], Common),
    ("他們", &["tā men"], Common),
    ("他们", &["tā men"], Common),
    ("早上", &["zǎo shang"], Regular),
    ("晚上", &["wǎn shang"], Regular),
    ("吃飯", &["chī fàn"], Regular),
    ("吃饭", &["chī fàn"], Regular),
    ("工作", &["gōng zuò"], Regular),
    ("學習", &["xué xí"], Regular),
    ("学习", &["xué xí"], Regular),
    ("電話", &["diàn huà"], Regular),
    ("电话", &["diàn huà"], Regular),
    ("時候", &["shí hou"], Regular),
    ("时候", &["shí hou"], Regular),
    ("現在", &["xiàn zài"], Common),
    ("现在", &["xiàn zài"], Common),
    ("漢語", &["hàn yǔ"], Regular),
    ("汉语", &["hàn yǔ"], Regular),
    ("銀行", &["yín háng"], Rare),
    ("银行", &["yín háng"], Rare),
    ("沒有", &["méi yǒu"], Common),
    ("没有", &["méi yǒu"], Common),
    ("可以", &["kě yǐ"], Common),
    ("不客氣", &["bú kè qi"], Regular),
    ("不客气", &["bú kè qi"], Regular),
    // Characters
    ("你", &["nǐ"], Common),
    ("妳", &["nǐ"], Rare),
    ("好", &["hǎo", "hào"], Common),
    ("嗎", &["ma"], Common),
    ("吗", &["ma"], Common),
    ("我", &["wǒ"], Common),
    ("是", &["shì"], Common),
    ("事", &["shì"], Regular),
    ("市", &["shì"], Regular),
    ("十", &["shí"], Common),
    ("四", &["sì"], Common),
    ("學", &["xué"], Regular),
    ("学", &["xué"], Regular),
    ("生", &["shēng"], Regular),
    ("謝", &["xiè"], Regular),
    ("谢", &["xiè"], Regular),
    ("對", &["duì"], Regular),
    ("对", &["duì"], Regular),
    ("不", &["bù"], Common),
    ("起", &["qǐ"], Regular),
    ("再", &["zài"], Regular),
    ("在", &["zài"], Common),
    ("見", &["jiàn"], Regular),
    ("见", &["jiàn"], Regular),
    ("件", &["jiàn"], Rare),
    ("建", &["jiàn"], Rare),
    ("他", &["tā"], Common),
    ("她", &["tā"], Common),
    ("它", &["tā"], Regular),
    ("們", &["men"], Regular),
    ("们", &["men"], Regular),
    ("的", &["de", "dí", "dì"], Common),
    ("了", &["le", "liǎo"], Common),
    ("很", &["hěn"], Common),
    ("中", &["zhōng", "zhòng"], Common),
    ("文", &["wén"], Regular),
    ("問", &["wèn"], Regular),
    ("问", &["wèn"], Regular),
    ("國", &["guó"], Regular),
    ("国", &["guó"], Regular),
    ("人", &["rén"], Common),
    ("老", &["lǎo"], Regular),
    ("師", &["shī"], Regular),
    ("师", &["shī"], Regular),
    ("朋", &["péng"], Rare),
    ("友", &["yǒu"], Regular),
    ("有", &["yǒu"], Common),
    ("喜", &["xǐ"], Regular),
    ("歡", &["huān"], Rare),
    ("欢", &["huān"], Rare),
    ("今", &["jīn"], Regular),
    ("天", &["tiān"], Common),
    ("明", &["míng"], Regular),
    ("名", &["míng"], Regular),
    ("字", &["zì"], Regular),
    ("什", &["shén"], Rare),
    ("麼", &["me"], Regular),
    ("么", &["me"], Regular),
    ("早", &["zǎo"], Regular),
    ("上", &["shàng"], Common),
    ("晚", &["wǎn"], Regular),
    ("吃", &["chī"], Common),
    ("飯", &["fàn"], Regular),
    ("饭", &["fàn"], Regular),
    ("工", &["gōng"], Regular),
    ("作", &["zuò"], Regular),
    ("做", &["zuò"], Common),
    ("坐", &["zuò"], Regular),
    ("習", &["xí"], Rare),
    ("习", &["xí"], Rare),
    ("電", &["diàn"], Regular),
    ("电", &["diàn"], Regular),
    ("話", &["huà"], Regular),
    ("话", &["huà"], Regular),
    ("時", &["shí"], Regular),
    ("时", &["shí"], Regular),
    ("候", &["hòu"], Rare),
    ("現", &["xiàn"], Regular),
    ("现", &["xiàn"], Regular),
    ("漢", &["hàn"], Rare),
    ("汉", &["hàn"], Rare),
    ("語", &["yǔ"], Regular),
    ("语", &["yǔ"], Regular),
    ("行", &["xíng", "háng"], Regular),
    ("長", &["cháng", "zhǎng"], Regular),
    ("长", &["cháng", "zhǎng"], Regular),
    ("說", &["shuō"], Common),
    ("说", &["shuō"], Common),
    ("叫", &["jiào"], Common),
    ("沒", &["méi"], Common),
    ("没", &["méi"], Common),
    ("會", &["huì"], Common),
    ("会", &["huì"], Common),
    ("去", &["qù"], Common),
    ("來", &["lái"], Common),
    ("来", &["lái"], Common),
    ("大", &["dà"], Common),
    ("小", &["xiǎo"], Common),
    ("一", &["yī"], Common),
    ("二", &["èr"], Common),
    ("三", &["sān"], Common),
    ("五", &["wǔ"], Common),
    ("媽", &["mā"], Common),
    ("妈", &["mā"], Common),
    ("馬", &["mǎ"], Regular),
    ("马", &["mǎ"], Regular),
    ("麻", &["má"], Rare),
    ("罵", &["mà"], Rare),
    ("骂", &["mà"], Rare),
];

/// Groups of tokens a listener (or recognizer) easily confuses.
pub(super) const CONFUSIONS: &[&[&str]] = &[
    &["是", "事", "市", "十"],
    &["四", "十"],
    &["你", "妳"],
    &["他", "她", "它"],
    &["再", "在"],
    &["見", "件", "建"],
    &["见", "件", "建"],
    &["作", "做", "坐"],
    &["媽", "馬", "麻", "罵"],
    &["妈", "马", "麻", "骂"],
    &["嗎", "馬"],
    &["吗", "马"],
    &["名", "明"],
    &["問", "文"],
    &["问", "文"],
    &["時", "十"],
    &["时", "十"],
    &["有", "友"],
    &["再見", "在見"],
    &["再见", "在见"],
];
